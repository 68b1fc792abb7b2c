use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::trip::{
    CreateTripRequest, TripFilters, TripResponse, UpdateTripRequest, UpdateTripStatusRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/", get(list_trips))
        .route("/:id", get(get_trip))
        .route("/:id", put(update_trip))
        .route("/:id/status", patch(update_trip_status))
        .route("/:id", delete(delete_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.create(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_trips(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(filters): Query<TripFilters>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.list(&ctx, filters).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResponse>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.get_by_id(&ctx, id).await?;
    Ok(Json(response))
}

async fn update_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.update(&ctx, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn update_trip_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripStatusRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let response = controller.update_status(&ctx, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_trip(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TripController::new(state.pool.clone());
    controller.delete(&ctx, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Viagem removida com sucesso"
    })))
}
