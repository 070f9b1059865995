use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Vehicle, VehicleClass, VehicleStatus};
use crate::utils::validation::{validate_coordinates, validate_not_empty, validate_vehicle_class};

// Nivel de energía cuando la request no lo indica
const DEFAULT_ENERGY_LEVEL: u8 = 100;

// Request para registrar un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_position", skip_on_field_errors = false))]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    #[validate(custom = "validate_not_empty")]
    pub license_plate: String,
    #[validate(custom = "validate_vehicle_class")]
    pub vehicle_type: String,
    pub status: Option<VehicleStatus>,
    #[validate(range(max = 100))]
    pub battery: Option<u8>,
    #[validate(range(max = 100))]
    pub fuel: Option<u8>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    pub mileage: Option<f64>,
    pub location: Option<String>,
    pub next_service_date: Option<NaiveDate>,
}

impl CreateVehicleRequest {
    /// Convertir a modelo; asume que la request ya pasó `validate()`
    pub fn into_vehicle(self, class: VehicleClass) -> Vehicle {
        let level = if class.is_electric() {
            self.battery.or(self.fuel)
        } else {
            self.fuel.or(self.battery)
        }
        .unwrap_or(DEFAULT_ENERGY_LEVEL);

        let mut vehicle = Vehicle::new(self.name.trim(), self.license_plate.trim(), class, level)
            .with_status(self.status.unwrap_or(VehicleStatus::Available))
            .with_position(self.latitude.unwrap_or(0.0), self.longitude.unwrap_or(0.0));
        vehicle.mileage = self.mileage;
        vehicle.location = self.location;
        vehicle.next_service_date = self.next_service_date;
        vehicle
    }
}

fn validate_create_position(request: &CreateVehicleRequest) -> Result<(), validator::ValidationError> {
    validate_coordinates(request.latitude.unwrap_or(0.0), request.longitude.unwrap_or(0.0))
}

// Response de vehículo
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub license_plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleClass,
    pub status: VehicleStatus,
    pub location: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: u32,
    pub battery: Option<u8>,
    pub fuel: Option<u8>,
    pub engine_health: Option<f64>,
    pub tire_pressure: Option<f64>,
    pub oil_level: Option<f64>,
    pub mileage: Option<f64>,
    pub next_service_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            display_name: v.display_name(),
            battery: v.energy.battery(),
            fuel: v.energy.fuel(),
            name: v.name,
            license_plate: v.license_plate,
            vehicle_type: v.class,
            status: v.status,
            location: v.location,
            latitude: v.latitude,
            longitude: v.longitude,
            speed: v.speed,
            engine_health: v.engine_health,
            tire_pressure: v.tire_pressure,
            oil_level: v.oil_level,
            mileage: v.mileage,
            next_service_date: v.next_service_date,
            last_maintenance_date: v.last_maintenance_date,
            last_updated: v.last_updated,
        }
    }
}
