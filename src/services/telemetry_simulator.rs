//! Simulador de telemetría
//! 
//! Mueve los vehículos IN_USE, sortea su velocidad, consume energía y marca
//! como CRITICAL los que bajan del umbral de energía. No registra snapshots.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::tick::{TickGuard, TickReport};
use super::vehicle_locks::VehicleLocks;
use crate::models::vehicle::ENERGY_RESERVE_FLOOR;
use crate::models::{Vehicle, VehicleStatus};
use crate::repositories::FleetStore;
use crate::utils::errors::AppResult;
use uuid::Uuid;

/// Con este nivel de batería/combustible o menos el vehículo pasa a CRITICAL
pub const CRITICAL_ENERGY_LEVEL: u8 = 15;

const POSITION_JITTER_WIDTH: f64 = 0.01;
const MIN_SPEED_KMH: u32 = 20;
const MAX_SPEED_KMH: u32 = 80;
const ENERGY_PER_TICK: u8 = 1;

/// Resultado de un paso de telemetría para un vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryStep {
    /// El vehículo no está IN_USE
    Idle,
    Moved { energy: u8, critical: bool },
}

/// Paso de telemetría sin efectos externos
pub fn advance_telemetry<R: Rng + ?Sized>(vehicle: &mut Vehicle, rng: &mut R) -> TelemetryStep {
    if vehicle.status != VehicleStatus::InUse {
        return TelemetryStep::Idle;
    }

    vehicle.latitude += (rng.gen::<f64>() - 0.5) * POSITION_JITTER_WIDTH;
    vehicle.longitude += (rng.gen::<f64>() - 0.5) * POSITION_JITTER_WIDTH;
    vehicle.speed = rng.gen_range(MIN_SPEED_KMH..MAX_SPEED_KMH);

    let energy = vehicle.energy.drain(ENERGY_PER_TICK, ENERGY_RESERVE_FLOOR);
    let critical = energy <= CRITICAL_ENERGY_LEVEL;
    if critical {
        vehicle.status = VehicleStatus::Critical;
    }

    TelemetryStep::Moved { energy, critical }
}

pub struct TelemetrySimulator {
    store: Arc<dyn FleetStore>,
    locks: Arc<VehicleLocks>,
    rng: Mutex<StdRng>,
    guard: TickGuard,
}

impl TelemetrySimulator {
    pub const JOB: &'static str = "telemetry";

    /// `locks` debe ser el mismo que usa el motor de salud
    pub fn new(store: Arc<dyn FleetStore>, locks: Arc<VehicleLocks>, rng: StdRng) -> Self {
        Self {
            store,
            locks,
            rng: Mutex::new(rng),
            guard: TickGuard::new(),
        }
    }

    pub async fn tick(&self) -> TickReport {
        self.tick_at(Utc::now()).await
    }

    pub async fn tick_at(&self, now: DateTime<Utc>) -> TickReport {
        let Some(_permit) = self.guard.try_acquire() else {
            log::warn!("⏭️ Tick de telemetría omitido: el anterior sigue en curso");
            return TickReport::skipped(Self::JOB);
        };

        let mut report = TickReport::started(Self::JOB);

        let fleet = match self.store.list_vehicles().await {
            Ok(fleet) => fleet,
            Err(e) => {
                log::error!("❌ No se pudo listar la flota para el tick de telemetría: {}", e);
                return report.aborted(e.to_string());
            }
        };

        // Solo se bloquean los que estaban IN_USE al listar; se revalida tras releer
        for vehicle in fleet {
            if vehicle.status != VehicleStatus::InUse {
                report.untouched += 1;
                continue;
            }

            match self.process_vehicle(vehicle.id, now).await {
                Ok(TelemetryStep::Moved { .. }) => report.processed += 1,
                Ok(TelemetryStep::Idle) => report.untouched += 1,
                Err(e) => {
                    log::warn!("⚠️ No se pudo actualizar la telemetría del vehículo {}: {}", vehicle.id, e);
                    report.record_failure(vehicle.id, e.to_string());
                }
            }
        }

        log::debug!("📡 {}", report);
        report
    }

    async fn process_vehicle(&self, vehicle_id: Uuid, now: DateTime<Utc>) -> AppResult<TelemetryStep> {
        let _lock = self.locks.lock(vehicle_id).await;
        let mut vehicle = self.store.get_vehicle(vehicle_id).await?;

        let step = {
            let mut rng = self.rng.lock().await;
            advance_telemetry(&mut vehicle, &mut *rng)
        };

        if let TelemetryStep::Moved { energy, critical } = step {
            if critical {
                log::warn!(
                    "🪫 {} con energía crítica ({}%), marcado como CRITICAL",
                    vehicle.display_name(),
                    energy
                );
            }
            vehicle.last_updated = Some(now);
            self.store.save_vehicle(vehicle).await?;
        }

        Ok(step)
    }
}
