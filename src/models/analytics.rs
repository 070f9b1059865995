//! Modelos de Analytics
//! 
//! Resumen del estado de la flota para el dashboard de mantenimiento.

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::vehicle::VehicleStatus;

/// Problema principal detectado en un vehículo con alerta
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AlertIssue {
    #[serde(rename = "Engine Critical")]
    EngineCritical,
    #[serde(rename = "Engine Wear")]
    EngineWear,
    #[serde(rename = "Low Tire Pressure")]
    LowTirePressure,
    #[serde(rename = "Routine Maintenance")]
    RoutineMaintenance,
}

/// Acción recomendada para una alerta
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AlertAction {
    #[serde(rename = "Immediate Grounding")]
    ImmediateGrounding,
    #[serde(rename = "Schedule Service")]
    ScheduleService,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MaintenanceAlert {
    pub id: Uuid,
    pub name: String,
    pub status: VehicleStatus,
    pub issue: AlertIssue,
    pub action: AlertAction,
}

/// Respuesta del dashboard de mantenimiento
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FleetAnalytics {
    pub status_distribution: BTreeMap<VehicleStatus, usize>,
    pub alerts: Vec<MaintenanceAlert>,
    pub total_fleet: usize,
}
