pub mod maintenance_controller;
pub mod route_controller;
pub mod telemetry_controller;
pub mod vehicle_controller;
