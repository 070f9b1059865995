use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{RouteOptimizationResponse, RouteRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_planning_router() -> Router<AppState> {
    Router::new().route("/optimize", post(optimize_routes))
}

async fn optimize_routes(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteOptimizationResponse>, AppError> {
    let controller = RouteController::new(state.route_optimizer.clone());
    let response = controller.optimize(request)?;
    Ok(Json(response))
}
