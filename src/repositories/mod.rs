//! Repositorios de la flota
//! 
//! `FleetStore` es el puerto de almacenamiento que usan los motores de simulación
//! y las consultas. Hay una implementación en memoria y otra sobre PostgreSQL.

pub mod fleet_store;
pub mod memory_repository;
pub mod pg_fleet_repository;

pub use fleet_store::*;
pub use memory_repository::InMemoryFleetStore;
pub use pg_fleet_repository::PgFleetStore;
