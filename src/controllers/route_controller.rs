use std::sync::Arc;
use validator::Validate;

use crate::dto::route_dto::{RouteOptimizationResponse, RouteRequest};
use crate::services::RouteOptimizer;
use crate::utils::errors::AppError;

pub struct RouteController {
    optimizer: Arc<RouteOptimizer>,
}

impl RouteController {
    pub fn new(optimizer: Arc<RouteOptimizer>) -> Self {
        Self { optimizer }
    }

    /// Síncrono: el cálculo no toca el almacenamiento
    pub fn optimize(&self, request: RouteRequest) -> Result<RouteOptimizationResponse, AppError> {
        request.validate()?;

        let mut rng = rand::thread_rng();
        let routes = self.optimizer.optimize(
            request.origin.trim(),
            request.destination.trim(),
            request.vehicle_type(),
            &mut rng,
        );

        Ok(RouteOptimizationResponse::success(routes))
    }
}
