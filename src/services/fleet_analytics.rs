//! Analytics de la flota
//! 
//! Lectura pura del estado actual: distribución por estado y alertas para los
//! vehículos en CRITICAL o MAINTENANCE, en el orden en que llegan.

use std::collections::BTreeMap;

use super::health_engine::{HealthReading, ENGINE_CRITICAL_BELOW, ENGINE_MAINTENANCE_BELOW, TIRE_MIN_PSI};
use crate::models::{AlertAction, AlertIssue, FleetAnalytics, MaintenanceAlert, Vehicle, VehicleStatus};

/// Problema principal, con la precedencia motor crítico > desgaste > neumáticos > rutina
pub fn primary_issue(vehicle: &Vehicle) -> AlertIssue {
    let reading = HealthReading::of(vehicle);

    if reading.engine_health < ENGINE_CRITICAL_BELOW {
        AlertIssue::EngineCritical
    } else if reading.engine_health < ENGINE_MAINTENANCE_BELOW {
        AlertIssue::EngineWear
    } else if reading.tire_pressure < TIRE_MIN_PSI {
        AlertIssue::LowTirePressure
    } else {
        AlertIssue::RoutineMaintenance
    }
}

pub fn recommended_action(status: VehicleStatus) -> AlertAction {
    match status {
        VehicleStatus::Critical => AlertAction::ImmediateGrounding,
        _ => AlertAction::ScheduleService,
    }
}

pub fn summarize(vehicles: &[Vehicle]) -> FleetAnalytics {
    let mut status_distribution = BTreeMap::new();
    for vehicle in vehicles {
        *status_distribution.entry(vehicle.status).or_insert(0) += 1;
    }

    let alerts = vehicles
        .iter()
        .filter(|v| v.status.needs_attention())
        .map(|v| MaintenanceAlert {
            id: v.id,
            name: v.display_name(),
            status: v.status,
            issue: primary_issue(v),
            action: recommended_action(v.status),
        })
        .collect();

    FleetAnalytics {
        status_distribution,
        alerts,
        total_fleet: vehicles.len(),
    }
}
