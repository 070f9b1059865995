use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::fleet_store::FleetStore;
use crate::models::{HealthSnapshot, Vehicle};
use crate::utils::errors::{not_found_error, AppResult};

// Repository en memoria - se usa cuando no hay DATABASE_URL y en los tests
#[derive(Clone, Default)]
pub struct InMemoryFleetStore {
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
    snapshots: Arc<RwLock<HashMap<Uuid, Vec<HealthSnapshot>>>>,
}

impl InMemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crear un store con vehículos ya cargados (en ese orden)
    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: Arc::new(RwLock::new(vehicles)),
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn snapshot_count(&self, vehicle_id: Uuid) -> usize {
        let snapshots = self.snapshots.read().await;
        snapshots.get(&vehicle_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl FleetStore for InMemoryFleetStore {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.vehicles.read().await.clone())
    }

    async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        let vehicles = self.vehicles.read().await;
        vehicles
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    async fn save_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.iter_mut().find(|v| v.id == vehicle.id) {
            Some(existing) => *existing = vehicle.clone(),
            None => vehicles.push(vehicle.clone()),
        }
        Ok(vehicle)
    }

    async fn append_health_snapshot(&self, snapshot: HealthSnapshot) -> AppResult<()> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.entry(snapshot.vehicle_id).or_default().push(snapshot);
        Ok(())
    }

    async fn recent_snapshots(&self, vehicle_id: Uuid, limit: usize) -> AppResult<Vec<HealthSnapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots
            .get(&vehicle_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn count_vehicles(&self) -> AppResult<usize> {
        Ok(self.vehicles.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleClass;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_save_replaces_existing_vehicle() {
        let store = InMemoryFleetStore::new();
        let mut vehicle = Vehicle::new("Toyota Camry", "SED-303", VehicleClass::Sedan, 45);
        store.save_vehicle(vehicle.clone()).await.unwrap();

        vehicle.speed = 50;
        store.save_vehicle(vehicle.clone()).await.unwrap();

        assert_eq!(store.count_vehicles().await.unwrap(), 1);
        assert_eq!(store.get_vehicle(vehicle.id).await.unwrap().speed, 50);
    }

    #[tokio::test]
    async fn test_get_unknown_vehicle_is_not_found() {
        let store = InMemoryFleetStore::new();
        let err = store.get_vehicle(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_recent_snapshots_newest_first() {
        let store = InMemoryFleetStore::new();
        let vehicle = Vehicle::new("Nissan Leaf", "EV-004", VehicleClass::Ev, 65);
        let start = Utc::now();

        for i in 0..5 {
            let snapshot = HealthSnapshot::capture(&vehicle, start + Duration::minutes(i));
            store.append_health_snapshot(snapshot).await.unwrap();
        }

        let recent = store.recent_snapshots(vehicle.id, 3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].timestamp, start + Duration::minutes(4));
        assert_eq!(recent[2].timestamp, start + Duration::minutes(2));
    }
}
