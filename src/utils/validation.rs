//! Utilidades de validación
//! 
//! Validadores custom usados por los DTOs (`#[validate(custom = "...")]`).

use validator::ValidationError;

use crate::models::vehicle::VehicleClass;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que la clase sea SEDAN, SUV, TRUCK o EV
pub fn validate_vehicle_class(value: &str) -> Result<(), ValidationError> {
    value.parse::<VehicleClass>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("vehicle_class");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &"SEDAN, SUV, TRUCK, EV".to_string());
        error
    })
}

/// Validar latitud en [-90, 90] y longitud en [-180, 180]
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        let mut error = ValidationError::new("coordinates");
        error.add_param("latitude".into(), &latitude);
        error.add_param("longitude".into(), &longitude);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Bangalore").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_vehicle_class() {
        assert!(validate_vehicle_class("ev").is_ok());
        assert!(validate_vehicle_class("TRUCK").is_ok());
        assert!(validate_vehicle_class("BICYCLE").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(12.9716, 77.5946).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }
}
