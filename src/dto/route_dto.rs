use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::RouteOption;
use crate::utils::validation::validate_not_empty;

/// Clase usada cuando la request no indica `vehicleType`
pub const DEFAULT_VEHICLE_TYPE: &str = "Standard";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    #[validate(custom = "validate_not_empty")]
    pub origin: String,
    #[validate(custom = "validate_not_empty")]
    pub destination: String,
    pub vehicle_type: Option<String>,
}

impl RouteRequest {
    pub fn vehicle_type(&self) -> &str {
        self.vehicle_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_VEHICLE_TYPE)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteOptimizationResponse {
    pub routes: Vec<RouteOption>,
    pub status: String,
}

impl RouteOptimizationResponse {
    pub fn success(routes: Vec<RouteOption>) -> Self {
        Self {
            routes,
            status: "success".to_string(),
        }
    }
}
