//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::FleetStore;
use crate::services::tick::simulation_rng;
use crate::services::{HealthEngine, RouteOptimizer, TelemetrySimulator, VehicleLocks};

// Streams independientes para que cada motor tenga su propia secuencia
const TELEMETRY_STREAM: u64 = 1;
const HEALTH_STREAM: u64 = 2;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: Arc<dyn FleetStore>,
    pub telemetry: Arc<TelemetrySimulator>,
    pub health: Arc<HealthEngine>,
    pub route_optimizer: Arc<RouteOptimizer>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, store: Arc<dyn FleetStore>) -> Self {
        let seed = config.simulation_seed;
        let locks = Arc::new(VehicleLocks::new());
        Self {
            telemetry: Arc::new(TelemetrySimulator::new(
                store.clone(),
                locks.clone(),
                simulation_rng(seed, TELEMETRY_STREAM),
            )),
            health: Arc::new(HealthEngine::new(store.clone(), locks, simulation_rng(seed, HEALTH_STREAM))),
            route_optimizer: Arc::new(RouteOptimizer::default()),
            config,
            store,
        }
    }
}
