use std::sync::Arc;
use uuid::Uuid;

use crate::models::{FleetAnalytics, HealthSnapshot};
use crate::repositories::FleetStore;
use crate::services::fleet_analytics::summarize;
use crate::services::{HealthEngine, TickReport};
use crate::utils::errors::{bad_request_error, AppError};

pub struct MaintenanceController {
    store: Arc<dyn FleetStore>,
    health: Arc<HealthEngine>,
}

impl MaintenanceController {
    pub fn new(store: Arc<dyn FleetStore>, health: Arc<HealthEngine>) -> Self {
        Self { store, health }
    }

    pub async fn analytics(&self) -> Result<FleetAnalytics, AppError> {
        let vehicles = self.store.list_vehicles().await?;
        Ok(summarize(&vehicles))
    }

    /// Histórico del más reciente al más antiguo; 404 si el vehículo no existe
    pub async fn history(&self, vehicle_id: Uuid, limit: usize) -> Result<Vec<HealthSnapshot>, AppError> {
        if limit == 0 {
            return Err(bad_request_error("limit must be greater than zero"));
        }

        self.store.get_vehicle(vehicle_id).await?;
        self.store.recent_snapshots(vehicle_id, limit).await
    }

    pub async fn simulate(&self) -> TickReport {
        log::info!("🩺 Tick de salud lanzado manualmente");
        self.health.tick().await
    }
}
