//! Modelo de Vehicle
//! 
//! Este módulo contiene el struct Vehicle, su clase, su estado operativo y la
//! fuente de energía (batería para EV, combustible para el resto).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Nivel mínimo de energía durante la simulación (reserva)
pub const ENERGY_RESERVE_FLOOR: u8 = 5;

// Valores iniciales de las métricas de salud cuando aún no existen
pub const DEFAULT_ENGINE_HEALTH: f64 = 100.0;
pub const DEFAULT_TIRE_PRESSURE_PSI: f64 = 32.0;
pub const DEFAULT_OIL_LEVEL: f64 = 100.0;
pub const DEFAULT_MILEAGE: f64 = 0.0;

/// Estado operativo del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
    Critical,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::InUse => "IN_USE",
            VehicleStatus::Maintenance => "MAINTENANCE",
            VehicleStatus::Critical => "CRITICAL",
        }
    }

    /// Vehículos que deben aparecer en la lista de alertas
    pub fn needs_attention(&self) -> bool {
        matches!(self, VehicleStatus::Critical | VehicleStatus::Maintenance)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(VehicleStatus::Available),
            "IN_USE" => Ok(VehicleStatus::InUse),
            "MAINTENANCE" => Ok(VehicleStatus::Maintenance),
            "CRITICAL" => Ok(VehicleStatus::Critical),
            other => Err(format!("unknown vehicle status '{}'", other)),
        }
    }
}

/// Clase de vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleClass {
    Sedan,
    Suv,
    Truck,
    Ev,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Sedan => "SEDAN",
            VehicleClass::Suv => "SUV",
            VehicleClass::Truck => "TRUCK",
            VehicleClass::Ev => "EV",
        }
    }

    pub fn is_electric(&self) -> bool {
        matches!(self, VehicleClass::Ev)
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SEDAN" => Ok(VehicleClass::Sedan),
            "SUV" => Ok(VehicleClass::Suv),
            "TRUCK" => Ok(VehicleClass::Truck),
            "EV" => Ok(VehicleClass::Ev),
            other => Err(format!("unknown vehicle class '{}'", other)),
        }
    }
}

/// Fuente de energía del vehículo: batería o combustible, nunca ambas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum EnergySource {
    Electric { battery: u8 },
    Combustion { fuel: u8 },
}

impl EnergySource {
    /// Construye la variante que corresponde a la clase (nivel limitado a 100)
    pub fn for_class(class: VehicleClass, level: u8) -> Self {
        let level = level.min(100);
        if class.is_electric() {
            EnergySource::Electric { battery: level }
        } else {
            EnergySource::Combustion { fuel: level }
        }
    }

    pub fn level(&self) -> u8 {
        match *self {
            EnergySource::Electric { battery } => battery,
            EnergySource::Combustion { fuel } => fuel,
        }
    }

    pub fn battery(&self) -> Option<u8> {
        match *self {
            EnergySource::Electric { battery } => Some(battery),
            EnergySource::Combustion { .. } => None,
        }
    }

    pub fn fuel(&self) -> Option<u8> {
        match *self {
            EnergySource::Combustion { fuel } => Some(fuel),
            EnergySource::Electric { .. } => None,
        }
    }

    /// Consume `amount` puntos sin bajar de `floor`; devuelve el nuevo nivel
    pub fn drain(&mut self, amount: u8, floor: u8) -> u8 {
        let level = match self {
            EnergySource::Electric { battery } => battery,
            EnergySource::Combustion { fuel } => fuel,
        };
        *level = level.saturating_sub(amount).max(floor);
        *level
    }
}

/// Vehicle principal de la flota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub class: VehicleClass,
    pub status: VehicleStatus,

    pub latitude: f64,
    pub longitude: f64,
    pub speed: u32,
    pub energy: EnergySource,

    // Métricas de salud - pueden faltar hasta el primer tick de salud
    pub engine_health: Option<f64>,
    pub tire_pressure: Option<f64>,
    pub oil_level: Option<f64>,
    pub mileage: Option<f64>,

    pub next_service_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Vehicle {
    /// Crear un vehículo disponible, sin posición ni métricas de salud
    pub fn new(name: impl Into<String>, license_plate: impl Into<String>, class: VehicleClass, energy_level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            license_plate: license_plate.into(),
            class,
            status: VehicleStatus::Available,
            latitude: 0.0,
            longitude: 0.0,
            speed: 0,
            energy: EnergySource::for_class(class, energy_level),
            engine_health: None,
            tire_pressure: None,
            oil_level: None,
            mileage: None,
            next_service_date: None,
            last_maintenance_date: None,
            location: None,
            last_updated: None,
        }
    }

    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Nombre para mostrar en alertas: "Tesla Model 3 (EV-001)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.license_plate)
    }

    pub fn energy_level(&self) -> u8 {
        self.energy.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_source_follows_class() {
        let ev = Vehicle::new("Nissan Leaf", "EV-004", VehicleClass::Ev, 65);
        assert_eq!(ev.energy.battery(), Some(65));
        assert_eq!(ev.energy.fuel(), None);

        let truck = Vehicle::new("Ford Transit", "TRK-202", VehicleClass::Truck, 120);
        assert_eq!(truck.energy.fuel(), Some(100));
        assert_eq!(truck.energy.battery(), None);
    }

    #[test]
    fn test_drain_stops_at_reserve() {
        let mut energy = EnergySource::Electric { battery: 6 };
        assert_eq!(energy.drain(1, ENERGY_RESERVE_FLOOR), 5);
        assert_eq!(energy.drain(1, ENERGY_RESERVE_FLOOR), 5);
    }

    #[test]
    fn test_status_parsing_and_serialization() {
        assert_eq!("in_use".parse::<VehicleStatus>(), Ok(VehicleStatus::InUse));
        assert!("parked".parse::<VehicleStatus>().is_err());
        assert_eq!(serde_json::to_string(&VehicleStatus::InUse).unwrap(), "\"IN_USE\"");
        assert_eq!(serde_json::to_string(&VehicleClass::Ev).unwrap(), "\"EV\"");
    }

    #[test]
    fn test_display_name() {
        let v = Vehicle::new("Tesla Model 3", "EV-001", VehicleClass::Ev, 95);
        assert_eq!(v.display_name(), "Tesla Model 3 (EV-001)");
    }
}
