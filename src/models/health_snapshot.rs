//! Histórico de salud
//! 
//! Un `HealthSnapshot` se crea una vez por vehículo en cada tick de salud y
//! nunca se modifica después.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vehicle::{Vehicle, DEFAULT_ENGINE_HEALTH, DEFAULT_OIL_LEVEL, DEFAULT_TIRE_PRESSURE_PSI};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub vehicle_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub engine_health: f64,
    /// Solo presente en vehículos eléctricos
    pub battery: Option<u8>,
    pub tire_pressure: f64,
    pub oil_level: f64,
}

impl HealthSnapshot {
    /// Copia las métricas actuales del vehículo; las que falten se registran con sus valores por defecto
    pub fn capture(vehicle: &Vehicle, timestamp: DateTime<Utc>) -> Self {
        Self {
            vehicle_id: vehicle.id,
            timestamp,
            engine_health: vehicle.engine_health.unwrap_or(DEFAULT_ENGINE_HEALTH),
            battery: vehicle.energy.battery(),
            tire_pressure: vehicle.tire_pressure.unwrap_or(DEFAULT_TIRE_PRESSURE_PSI),
            oil_level: vehicle.oil_level.unwrap_or(DEFAULT_OIL_LEVEL),
        }
    }
}
