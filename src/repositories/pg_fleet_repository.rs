use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::fleet_store::FleetStore;
use crate::models::{EnergySource, HealthSnapshot, Vehicle, VehicleClass, VehicleStatus};
use crate::utils::errors::{not_found_error, AppError, AppResult};

const VEHICLE_COLUMNS: &str = "id, name, license_plate, vehicle_class, status, latitude, longitude, speed, \
     energy_level, engine_health, tire_pressure, oil_level, mileage, next_service_date, \
     last_maintenance_date, location, last_updated";

// Fila tal cual está en la tabla vehicles
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    name: String,
    license_plate: String,
    vehicle_class: String,
    status: String,
    latitude: f64,
    longitude: f64,
    speed: i32,
    energy_level: i32,
    engine_health: Option<f64>,
    tire_pressure: Option<f64>,
    oil_level: Option<f64>,
    mileage: Option<f64>,
    next_service_date: Option<NaiveDate>,
    last_maintenance_date: Option<NaiveDate>,
    location: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let class: VehicleClass = row.vehicle_class.parse().map_err(AppError::Storage)?;
        let status: VehicleStatus = row.status.parse().map_err(AppError::Storage)?;
        let level = row.energy_level.clamp(0, 100) as u8;

        Ok(Vehicle {
            id: row.id,
            name: row.name,
            license_plate: row.license_plate,
            class,
            status,
            latitude: row.latitude,
            longitude: row.longitude,
            speed: row.speed.max(0) as u32,
            energy: EnergySource::for_class(class, level),
            engine_health: row.engine_health,
            tire_pressure: row.tire_pressure,
            oil_level: row.oil_level,
            mileage: row.mileage,
            next_service_date: row.next_service_date,
            last_maintenance_date: row.last_maintenance_date,
            location: row.location,
            last_updated: row.last_updated,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HealthLogRow {
    vehicle_id: Uuid,
    recorded_at: DateTime<Utc>,
    engine_health: f64,
    battery: Option<i32>,
    tire_pressure: f64,
    oil_level: f64,
}

impl From<HealthLogRow> for HealthSnapshot {
    fn from(row: HealthLogRow) -> Self {
        Self {
            vehicle_id: row.vehicle_id,
            timestamp: row.recorded_at,
            engine_health: row.engine_health,
            battery: row.battery.map(|b| b.clamp(0, 100) as u8),
            tire_pressure: row.tire_pressure,
            oil_level: row.oil_level,
        }
    }
}

/// `LIMIT` de Postgres es BIGINT; un `usize` mayor se satura en vez de volverse negativo
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

pub struct PgFleetStore {
    pool: PgPool,
}

impl PgFleetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles ORDER BY created_at, id",
            VEHICLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        Vehicle::try_from(row)
    }

    async fn save_vehicle(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                license_plate = EXCLUDED.license_plate,
                vehicle_class = EXCLUDED.vehicle_class,
                status = EXCLUDED.status,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                speed = EXCLUDED.speed,
                energy_level = EXCLUDED.energy_level,
                engine_health = EXCLUDED.engine_health,
                tire_pressure = EXCLUDED.tire_pressure,
                oil_level = EXCLUDED.oil_level,
                mileage = EXCLUDED.mileage,
                next_service_date = EXCLUDED.next_service_date,
                last_maintenance_date = EXCLUDED.last_maintenance_date,
                location = EXCLUDED.location,
                last_updated = EXCLUDED.last_updated
            RETURNING {cols}
            "#,
            cols = VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.license_plate)
        .bind(vehicle.class.as_str())
        .bind(vehicle.status.as_str())
        .bind(vehicle.latitude)
        .bind(vehicle.longitude)
        .bind(vehicle.speed as i32)
        .bind(vehicle.energy_level() as i32)
        .bind(vehicle.engine_health)
        .bind(vehicle.tire_pressure)
        .bind(vehicle.oil_level)
        .bind(vehicle.mileage)
        .bind(vehicle.next_service_date)
        .bind(vehicle.last_maintenance_date)
        .bind(&vehicle.location)
        .bind(vehicle.last_updated)
        .fetch_one(&self.pool)
        .await?;

        Vehicle::try_from(row)
    }

    async fn append_health_snapshot(&self, snapshot: HealthSnapshot) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicle_health_logs (vehicle_id, recorded_at, engine_health, battery, tire_pressure, oil_level)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(snapshot.vehicle_id)
        .bind(snapshot.timestamp)
        .bind(snapshot.engine_health)
        .bind(snapshot.battery.map(i32::from))
        .bind(snapshot.tire_pressure)
        .bind(snapshot.oil_level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn recent_snapshots(&self, vehicle_id: Uuid, limit: usize) -> AppResult<Vec<HealthSnapshot>> {
        let rows = sqlx::query_as::<_, HealthLogRow>(
            r#"
            SELECT vehicle_id, recorded_at, engine_health, battery, tire_pressure, oil_level
            FROM vehicle_health_logs
            WHERE vehicle_id = $1
            ORDER BY recorded_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(vehicle_id)
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HealthSnapshot::from).collect())
    }

    async fn count_vehicles(&self) -> AppResult<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_limit_saturates() {
        assert_eq!(sql_limit(20), 20);
        assert_eq!(sql_limit(i64::MAX as usize), i64::MAX);
        assert_eq!(sql_limit(usize::MAX), i64::MAX);
    }

    #[test]
    fn test_row_with_unknown_status_is_a_storage_error() {
        let row = VehicleRow {
            id: Uuid::nil(),
            name: "Tesla Model 3".to_string(),
            license_plate: "EV-001".to_string(),
            vehicle_class: "EV".to_string(),
            status: "PARKED".to_string(),
            latitude: 40.7128,
            longitude: -74.0060,
            speed: 0,
            energy_level: 95,
            engine_health: None,
            tire_pressure: None,
            oil_level: None,
            mileage: None,
            next_service_date: None,
            last_maintenance_date: None,
            location: None,
            last_updated: None,
        };

        assert!(matches!(Vehicle::try_from(row), Err(AppError::Storage(_))));
    }
}
