//! Locks por vehículo compartidos entre motores
//! 
//! Telemetría y salud corren en tareas distintas; cada una toma el lock del
//! vehículo, lo vuelve a leer del almacenamiento, lo modifica y lo guarda.
//! Así ninguna guarda una copia vieja encima de lo que escribió la otra.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct VehicleLocks {
    locks: StdMutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl VehicleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Espera hasta tener el vehículo en exclusiva; se libera al soltar el guard
    pub async fn lock(&self, vehicle_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(vehicle_id).or_default().clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_vehicle_is_exclusive() {
        let locks = Arc::new(VehicleLocks::new());
        let id = Uuid::new_v4();

        let guard = locks.lock(id).await;
        let waiting = tokio::spawn({
            let locks = locks.clone();
            async move {
                let _guard = locks.lock(id).await;
            }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        waiting.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_vehicles_do_not_block() {
        let locks = VehicleLocks::new();
        let _a = locks.lock(Uuid::new_v4()).await;
        let _b = locks.lock(Uuid::new_v4()).await;
    }
}
