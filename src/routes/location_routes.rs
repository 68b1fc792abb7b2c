use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::location_controller::LocationController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::location::{CreateLocationRequest, DriverLocation, LatestLocationResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ping))
        .route("/latest", get(latest_locations))
        .route("/online", get(online_drivers))
        .route("/driver/:driver_id", get(driver_location))
}

async fn create_ping(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateLocationRequest>,
) -> Result<Json<ApiResponse<DriverLocation>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.ping(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn latest_locations(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<LatestLocationResponse>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.latest(&ctx).await?;
    Ok(Json(response))
}

async fn online_drivers(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<LatestLocationResponse>>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.online(&ctx).await?;
    Ok(Json(response))
}

async fn driver_location(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(driver_id): Path<Uuid>,
) -> Result<Json<LatestLocationResponse>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.latest_for_driver(&ctx, driver_id).await?;
    Ok(Json(response))
}
