//! Modelos del sistema
//! 
//! Este módulo contiene los registros de la flota (vehículos e histórico de salud)
//! y los valores que producen los motores de rutas y analytics.

pub mod analytics;
pub mod health_snapshot;
pub mod route;
pub mod vehicle;

pub use analytics::*;
pub use health_snapshot::*;
pub use route::*;
pub use vehicle::*;
