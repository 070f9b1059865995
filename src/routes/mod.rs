pub mod maintenance_routes;
pub mod route_planning_routes;
pub mod telemetry_routes;
pub mod vehicle_routes;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;

pub const BANNER: &str = "Fleet telemetry API running";

/// Router completo de la API con CORS y trazas HTTP
pub fn create_app(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .route("/", get(|| async { BANNER }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/routes", route_planning_routes::create_route_planning_router())
        .nest("/api/maintenance", maintenance_routes::create_maintenance_router())
        .nest("/api/telemetry", telemetry_routes::create_telemetry_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
