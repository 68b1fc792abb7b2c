use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::trailer_controller::TrailerController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::trailer::{CreateTrailerRequest, TrailerResponse, UpdateTrailerRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trailer_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trailer))
        .route("/", get(list_trailers))
        .route("/:id", get(get_trailer))
        .route("/:id", put(update_trailer))
        .route("/:id", delete(delete_trailer))
}

async fn create_trailer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateTrailerRequest>,
) -> Result<Json<ApiResponse<TrailerResponse>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.create(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_trailers(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<TrailerResponse>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.list(&ctx).await?;
    Ok(Json(response))
}

async fn get_trailer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrailerResponse>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.get_by_id(&ctx, id).await?;
    Ok(Json(response))
}

async fn update_trailer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTrailerRequest>,
) -> Result<Json<ApiResponse<TrailerResponse>>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    let response = controller.update(&ctx, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_trailer(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TrailerController::new(state.pool.clone());
    controller.delete(&ctx, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Reboque removido com sucesso"
    })))
}
