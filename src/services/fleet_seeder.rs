//! Flota de ejemplo
//! 
//! Carga cuatro vehículos de demostración cuando el almacenamiento está vacío.
//! Si ya hay vehículos no hace nada.

use chrono::{Days, Months, NaiveDate};

use crate::models::{Vehicle, VehicleClass, VehicleStatus};
use crate::repositories::FleetStore;
use crate::utils::errors::AppResult;

struct SampleVehicle {
    name: &'static str,
    plate: &'static str,
    class: VehicleClass,
    status: VehicleStatus,
    energy: u8,
    position: (f64, f64),
    speed: u32,
    mileage: f64,
    location: &'static str,
    next_service: ServiceOffset,
}

enum ServiceOffset {
    Weeks(u64),
    Months(u32),
}

impl ServiceOffset {
    fn applied_to(&self, today: NaiveDate) -> Option<NaiveDate> {
        match *self {
            ServiceOffset::Weeks(w) => today.checked_add_days(Days::new(w * 7)),
            ServiceOffset::Months(m) => today.checked_add_months(Months::new(m)),
        }
    }
}

const SAMPLE_FLEET: &[SampleVehicle] = &[
    SampleVehicle {
        name: "Tesla Model 3",
        plate: "EV-001",
        class: VehicleClass::Ev,
        status: VehicleStatus::Available,
        energy: 95,
        position: (40.7128, -74.0060),
        speed: 0,
        mileage: 12_500.0,
        location: "Manhattan Depot",
        next_service: ServiceOffset::Months(3),
    },
    SampleVehicle {
        name: "Ford Transit",
        plate: "TRK-202",
        class: VehicleClass::Truck,
        status: VehicleStatus::InUse,
        energy: 75,
        position: (40.7580, -73.9855),
        speed: 45,
        mileage: 45_000.0,
        location: "Midtown NYC",
        next_service: ServiceOffset::Months(1),
    },
    SampleVehicle {
        name: "Toyota Camry",
        plate: "SED-303",
        class: VehicleClass::Sedan,
        status: VehicleStatus::Maintenance,
        energy: 45,
        position: (40.7484, -73.9857),
        speed: 0,
        mileage: 78_000.0,
        location: "Service Center",
        next_service: ServiceOffset::Weeks(1),
    },
    SampleVehicle {
        name: "Nissan Leaf",
        plate: "EV-004",
        class: VehicleClass::Ev,
        status: VehicleStatus::InUse,
        energy: 65,
        position: (40.7306, -73.9352),
        speed: 35,
        mileage: 28_000.0,
        location: "Queens",
        next_service: ServiceOffset::Months(2),
    },
];

/// Vehículos de ejemplo con las métricas de salud iniciales
pub fn sample_fleet(today: NaiveDate) -> Vec<Vehicle> {
    SAMPLE_FLEET
        .iter()
        .map(|s| {
            let mut v = Vehicle::new(s.name, s.plate, s.class, s.energy)
                .with_status(s.status)
                .with_position(s.position.0, s.position.1);
            v.speed = s.speed;
            v.mileage = Some(s.mileage);
            v.location = Some(s.location.to_string());
            v.next_service_date = s.next_service.applied_to(today);
            v
        })
        .collect()
}

/// Devuelve cuántos vehículos se insertaron (0 si la flota ya existía)
pub async fn seed_sample_fleet(store: &dyn FleetStore, today: NaiveDate) -> AppResult<usize> {
    let existing = store.count_vehicles().await?;
    if existing > 0 {
        log::debug!("🌱 Flota existente ({} vehículos), no se cargan datos de ejemplo", existing);
        return Ok(0);
    }

    let fleet = sample_fleet(today);
    let inserted = fleet.len();
    for vehicle in fleet {
        store.save_vehicle(vehicle).await?;
    }

    log::info!("🌱 Flota de ejemplo cargada: {} vehículos", inserted);
    Ok(inserted)
}
