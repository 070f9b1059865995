use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::models::VehicleClass;
use crate::repositories::FleetStore;
use crate::utils::errors::{bad_request_error, AppError};

pub struct VehicleController {
    store: Arc<dyn FleetStore>,
}

impl VehicleController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        let class: VehicleClass = request
            .vehicle_type
            .parse()
            .map_err(|e: String| bad_request_error(&e))?;

        let vehicle = self.store.save_vehicle(request.into_vehicle(class)).await?;
        log::info!("🚗 Vehículo registrado: {} [{}]", vehicle.display_name(), vehicle.id);

        Ok(vehicle.into())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self.store.get_vehicle(id).await?;
        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.store.list_vehicles().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }
}
