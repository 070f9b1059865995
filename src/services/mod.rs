pub mod distance;
pub mod fleet_analytics;
pub mod fleet_seeder;
pub mod geo_lookup;
pub mod health_engine;
pub mod path_synthesizer;
pub mod route_optimizer;
pub mod scheduler;
pub mod telemetry_simulator;
pub mod tick;
pub mod vehicle_locks;

pub use geo_lookup::GeoLookup;
pub use health_engine::HealthEngine;
pub use route_optimizer::RouteOptimizer;
pub use telemetry_simulator::TelemetrySimulator;
pub use tick::{TickGuard, TickReport};
pub use vehicle_locks::VehicleLocks;
