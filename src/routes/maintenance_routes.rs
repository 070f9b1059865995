use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::HistoryQuery;
use crate::models::{FleetAnalytics, HealthSnapshot};
use crate::services::TickReport;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(dashboard_analytics))
        .route("/history/:vehicle_id", get(vehicle_history))
        .route("/simulate", post(simulate_health))
}

fn controller(state: &AppState) -> MaintenanceController {
    MaintenanceController::new(state.store.clone(), state.health.clone())
}

async fn dashboard_analytics(State(state): State<AppState>) -> Result<Json<FleetAnalytics>, AppError> {
    let response = controller(&state).analytics().await?;
    Ok(Json(response))
}

async fn vehicle_history(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HealthSnapshot>>, AppError> {
    let limit = query.limit.unwrap_or(state.config.history_limit);
    let response = controller(&state).history(vehicle_id, limit).await?;
    Ok(Json(response))
}

async fn simulate_health(State(state): State<AppState>) -> Json<TickReport> {
    Json(controller(&state).simulate().await)
}
