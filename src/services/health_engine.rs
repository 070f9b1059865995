//! Motor de degradación de salud
//! 
//! En cada tick desgasta las métricas de cada vehículo, lo reclasifica con las
//! reglas de umbrales, recalcula la próxima fecha de servicio y registra un
//! snapshot. Cada vehículo se procesa de forma independiente.

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::tick::{TickGuard, TickReport};
use super::vehicle_locks::VehicleLocks;
use crate::models::vehicle::{
    DEFAULT_ENGINE_HEALTH, DEFAULT_MILEAGE, DEFAULT_OIL_LEVEL, DEFAULT_TIRE_PRESSURE_PSI,
};
use crate::models::{HealthSnapshot, Vehicle, VehicleStatus};
use crate::repositories::FleetStore;
use crate::utils::errors::AppResult;
use uuid::Uuid;

// Umbrales de clasificación
pub const ENGINE_CRITICAL_BELOW: f64 = 50.0;
pub const ENGINE_MAINTENANCE_BELOW: f64 = 80.0;
pub const TIRE_CRITICAL_BELOW_PSI: f64 = 25.0;
pub const TIRE_MIN_PSI: f64 = 28.0;
pub const TIRE_MAX_PSI: f64 = 36.0;

// Desgaste por tick
const MAX_WEAR: f64 = 0.5;
const TIRE_LEAK_DRAW_ABOVE: f64 = 0.8;
const TIRE_LEAK_PSI: f64 = 0.2;
const TIRE_FLOOR_PSI: f64 = 20.0;
const OIL_WEAR_RATIO: f64 = 0.1;
const MAX_TICK_MILEAGE: f64 = 10.0;

/// Métricas de salud resueltas (sin valores ausentes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthReading {
    pub engine_health: f64,
    pub tire_pressure: f64,
    pub oil_level: f64,
    pub mileage: f64,
}

impl HealthReading {
    /// Lee las métricas del vehículo; las que falten toman su valor inicial
    pub fn of(vehicle: &Vehicle) -> Self {
        Self {
            engine_health: vehicle.engine_health.unwrap_or(DEFAULT_ENGINE_HEALTH),
            tire_pressure: vehicle.tire_pressure.unwrap_or(DEFAULT_TIRE_PRESSURE_PSI),
            oil_level: vehicle.oil_level.unwrap_or(DEFAULT_OIL_LEVEL),
            mileage: vehicle.mileage.unwrap_or(DEFAULT_MILEAGE),
        }
    }

    pub fn write_to(&self, vehicle: &mut Vehicle) {
        vehicle.engine_health = Some(self.engine_health);
        vehicle.tire_pressure = Some(self.tire_pressure);
        vehicle.oil_level = Some(self.oil_level);
        vehicle.mileage = Some(self.mileage);
    }

    /// Un paso de desgaste: motor, presión de neumáticos, aceite y kilometraje
    pub fn apply_wear<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let wear = rng.gen::<f64>() * MAX_WEAR;
        self.engine_health = (self.engine_health - wear).clamp(0.0, 100.0);

        if rng.gen::<f64>() > TIRE_LEAK_DRAW_ABOVE {
            self.tire_pressure = (self.tire_pressure - TIRE_LEAK_PSI).max(TIRE_FLOOR_PSI);
        }

        self.oil_level = (self.oil_level - wear * OIL_WEAR_RATIO).clamp(0.0, 100.0);
        self.mileage += rng.gen::<f64>() * MAX_TICK_MILEAGE;
    }
}

/// Cómo se recalcula la próxima fecha de servicio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceDatePolicy {
    /// Servicio hoy mismo
    Immediate,
    /// Hoy + 7 días si no hay fecha o ya pasó
    WithinWeekIfStale,
    /// Hoy + 3 meses solo si no hay fecha
    QuarterlyIfUnset,
}

impl ServiceDatePolicy {
    pub fn next_service_date(&self, current: Option<NaiveDate>, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            ServiceDatePolicy::Immediate => Some(today),
            ServiceDatePolicy::WithinWeekIfStale => match current {
                Some(date) if date >= today => Some(date),
                _ => today.checked_add_days(Days::new(7)).or(Some(today)),
            },
            // Una fecha pasada se conserva tal cual
            ServiceDatePolicy::QuarterlyIfUnset => {
                current.or_else(|| today.checked_add_months(Months::new(3)).or(Some(today)))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: VehicleStatus,
    pub policy: ServiceDatePolicy,
}

/// Reglas de umbrales; las críticas tienen prioridad sobre las de mantenimiento
pub fn classify(reading: &HealthReading) -> Classification {
    let critical = reading.engine_health < ENGINE_CRITICAL_BELOW || reading.tire_pressure < TIRE_CRITICAL_BELOW_PSI;
    let maintenance = reading.engine_health < ENGINE_MAINTENANCE_BELOW
        || reading.tire_pressure < TIRE_MIN_PSI
        || reading.tire_pressure > TIRE_MAX_PSI;

    if critical {
        Classification {
            status: VehicleStatus::Critical,
            policy: ServiceDatePolicy::Immediate,
        }
    } else if maintenance {
        Classification {
            status: VehicleStatus::Maintenance,
            policy: ServiceDatePolicy::WithinWeekIfStale,
        }
    } else {
        Classification {
            status: VehicleStatus::Available,
            policy: ServiceDatePolicy::QuarterlyIfUnset,
        }
    }
}

/// Aplica la clasificación al vehículo. Un vehículo CRITICAL solo se vuelve a
/// tocar si la clasificación sigue siendo crítica.
pub fn apply_classification(vehicle: &mut Vehicle, classification: Classification, today: NaiveDate) {
    if vehicle.status == VehicleStatus::Critical && classification.status != VehicleStatus::Critical {
        return;
    }

    vehicle.status = classification.status;
    vehicle.next_service_date = classification
        .policy
        .next_service_date(vehicle.next_service_date, today);
}

/// Tick completo de un vehículo sin efectos externos
pub fn advance_health<R: Rng + ?Sized>(vehicle: &mut Vehicle, rng: &mut R, today: NaiveDate) -> Classification {
    let mut reading = HealthReading::of(vehicle);
    reading.apply_wear(rng);
    reading.write_to(vehicle);

    let classification = classify(&reading);
    apply_classification(vehicle, classification, today);
    classification
}

pub struct HealthEngine {
    store: Arc<dyn FleetStore>,
    locks: Arc<VehicleLocks>,
    rng: Mutex<StdRng>,
    guard: TickGuard,
}

impl HealthEngine {
    pub const JOB: &'static str = "health";

    /// `locks` debe ser el mismo que usa el simulador de telemetría
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

    /// Recorre toda la flota; un fallo en un vehículo no detiene el resto
    pub async fn tick_at(&self, now: DateTime<Utc>) -> TickReport {
        let Some(_permit) = self.guard.try_acquire() else {
            log::warn!("⏭️ Tick de salud omitido: el anterior sigue en curso");
            return TickReport::skipped(Self::JOB);
        };

        let mut report = TickReport::started(Self::JOB);

        let fleet = match self.store.list_vehicles().await {
            Ok(fleet) => fleet,
            Err(e) => {
                log::error!("❌ No se pudo listar la flota para el tick de salud: {}", e);
                return report.aborted(e.to_string());
            }
        };

        for vehicle_id in fleet.iter().map(|v| v.id) {
            match self.process_vehicle(vehicle_id, now).await {
                Ok(()) => report.processed += 1,
                Err(e) => {
                    log::warn!("⚠️ Fallo procesando salud del vehículo {}: {}", vehicle_id, e);
                    report.record_failure(vehicle_id, e.to_string());
                }
            }
        }

        log::info!("🩺 {}", report);
        report
    }

    /// Lee-modifica-escribe bajo el lock del vehículo, sobre su estado actual
    async fn process_vehicle(&self, vehicle_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        let _lock = self.locks.lock(vehicle_id).await;
        let mut vehicle = self.store.get_vehicle(vehicle_id).await?;

        let previous = vehicle.status;
        let classification = {
            let mut rng = self.rng.lock().await;
            advance_health(&mut vehicle, &mut *rng, now.date_naive())
        };
        vehicle.last_updated = Some(now);

        if vehicle.status != previous {
            log::info!(
                "🔧 {} pasa de {} a {} (motor {:.1}%, neumáticos {:.1} PSI)",
                vehicle.display_name(),
                previous,
                vehicle.status,
                vehicle.engine_health.unwrap_or_default(),
                vehicle.tire_pressure.unwrap_or_default()
            );
        } else if classification.status != vehicle.status {
            log::debug!("{} se mantiene en {} (clasificado {})", vehicle.display_name(), vehicle.status, classification.status);
        }

        let saved = self.store.save_vehicle(vehicle).await?;
        self.store
            .append_health_snapshot(HealthSnapshot::capture(&saved, now))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn reading(engine_health: f64, tire_pressure: f64) -> HealthReading {
        HealthReading {
            engine_health,
            tire_pressure,
            oil_level: 90.0,
            mileage: 1000.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_classification_table() {
        assert_eq!(classify(&reading(49.9, 32.0)).status, VehicleStatus::Critical);
        assert_eq!(classify(&reading(95.0, 24.9)).status, VehicleStatus::Critical);
        assert_eq!(classify(&reading(79.9, 32.0)).status, VehicleStatus::Maintenance);
        assert_eq!(classify(&reading(95.0, 27.9)).status, VehicleStatus::Maintenance);
        assert_eq!(classify(&reading(95.0, 36.1)).status, VehicleStatus::Maintenance);
        assert_eq!(classify(&reading(80.0, 28.0)).status, VehicleStatus::Available);
        assert_eq!(classify(&reading(80.0, 36.0)).status, VehicleStatus::Available);
        // crítico domina aunque también haya motivo de mantenimiento
        assert_eq!(classify(&reading(45.0, 40.0)).policy, ServiceDatePolicy::Immediate);
    }

    #[test]
    fn test_service_date_policies() {
        let today = today();
        let past = today - Days::new(3);
        let future = today + Days::new(20);

        assert_eq!(ServiceDatePolicy::Immediate.next_service_date(Some(future), today), Some(today));

        let week = ServiceDatePolicy::WithinWeekIfStale;
        assert_eq!(week.next_service_date(None, today), Some(today + Days::new(7)));
        assert_eq!(week.next_service_date(Some(past), today), Some(today + Days::new(7)));
        assert_eq!(week.next_service_date(Some(future), today), Some(future));

        let quarter = ServiceDatePolicy::QuarterlyIfUnset;
        assert_eq!(quarter.next_service_date(None, today), NaiveDate::from_ymd_opt(2025, 6, 10));
        // la fecha vencida no se renueva
        assert_eq!(quarter.next_service_date(Some(past), today), Some(past));
    }

    #[test]
    fn test_missing_metrics_are_initialised() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut vehicle = Vehicle::new("Toyota Camry", "SED-303", VehicleClass::Sedan, 45);

        advance_health(&mut vehicle, &mut rng, today());

        let engine = vehicle.engine_health.unwrap();
        assert!(engine <= 100.0 && engine > 99.5);
        let tire = vehicle.tire_pressure.unwrap();
        assert!(tire == 32.0 || (tire - 31.8).abs() < 1e-9);
        assert!(vehicle.oil_level.unwrap() <= 100.0);
        assert!(vehicle.mileage.unwrap() >= 0.0 && vehicle.mileage.unwrap() < 10.0);
        assert_eq!(vehicle.status, VehicleStatus::Available);
        assert_eq!(vehicle.next_service_date, NaiveDate::from_ymd_opt(2025, 6, 10));
    }

    #[test]
    fn test_wear_never_increases_engine_health() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut r = reading(60.0, 30.0);
        for _ in 0..500 {
            let before = r;
            r.apply_wear(&mut rng);
            assert!(r.engine_health <= before.engine_health);
            assert!(r.engine_health >= 0.0);
            assert!(r.tire_pressure >= TIRE_FLOOR_PSI);
            assert!(r.oil_level >= 0.0);
            assert!(r.mileage >= before.mileage);
        }
    }

    #[test]
    fn test_critical_engine_sets_service_today() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut vehicle = Vehicle::new("Ford Transit", "TRK-202", VehicleClass::Truck, 75);
        vehicle.engine_health = Some(45.0);
        vehicle.tire_pressure = Some(30.0);
        vehicle.next_service_date = Some(today() + Days::new(30));

        advance_health(&mut vehicle, &mut rng, today());

        assert_eq!(vehicle.status, VehicleStatus::Critical);
        assert_eq!(vehicle.next_service_date, Some(today()));
    }

    #[test]
    fn test_critical_status_is_not_downgraded() {
        let today = today();
        let mut vehicle = Vehicle::new("Nissan Leaf", "EV-004", VehicleClass::Ev, 12).with_status(VehicleStatus::Critical);
        vehicle.next_service_date = Some(today - Days::new(1));

        apply_classification(&mut vehicle, classify(&reading(95.0, 32.0)), today);
        assert_eq!(vehicle.status, VehicleStatus::Critical);
        assert_eq!(vehicle.next_service_date, Some(today - Days::new(1)));

        apply_classification(&mut vehicle, classify(&reading(70.0, 32.0)), today);
        assert_eq!(vehicle.status, VehicleStatus::Critical);
    }

    #[test]
    fn test_maintenance_keeps_future_date() {
        let today = today();
        let future = today + Days::new(3);
        let mut vehicle = Vehicle::new("Toyota Camry", "SED-303", VehicleClass::Sedan, 45);
        vehicle.next_service_date = Some(future);

        apply_classification(&mut vehicle, classify(&reading(70.0, 32.0)), today);
        assert_eq!(vehicle.status, VehicleStatus::Maintenance);
        assert_eq!(vehicle.next_service_date, Some(future));
    }
}
