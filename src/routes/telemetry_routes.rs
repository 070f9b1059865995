use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::telemetry_controller::TelemetryController;
use crate::services::TickReport;
use crate::state::AppState;

pub fn create_telemetry_router() -> Router<AppState> {
    Router::new().route("/simulate", post(simulate_telemetry))
}

async fn simulate_telemetry(State(state): State<AppState>) -> Json<TickReport> {
    let controller = TelemetryController::new(state.telemetry.clone());
    Json(controller.simulate().await)
}
