use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{HealthSnapshot, Vehicle};
use crate::utils::errors::AppResult;

/// Puerto de almacenamiento de la flota.
///
/// Cada vehículo es la unidad de lectura-modificación-escritura; no hay
/// transacciones entre vehículos.
#[async_trait]
pub trait FleetStore: Send + Sync {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>>;

    /// `AppError::NotFound` si el id no existe
    async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle>;

    /// Inserta o reemplaza el vehículo completo
    async fn save_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    async fn append_health_snapshot(&self, snapshot: HealthSnapshot) -> AppResult<()>;

    /// Últimos `limit` snapshots del vehículo, del más reciente al más antiguo
    async fn recent_snapshots(&self, vehicle_id: Uuid, limit: usize) -> AppResult<Vec<HealthSnapshot>>;

    async fn count_vehicles(&self) -> AppResult<usize>;
}
