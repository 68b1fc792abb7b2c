use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::maintenance::{
    CreateMaintenanceRequest, MaintenanceFilters, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_record))
        .route("/", get(list_records))
        .route("/:id", put(update_record))
        .route("/:id", delete(delete_record))
}

async fn create_record(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.create(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_records(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(filters): Query<MaintenanceFilters>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.list(&ctx, filters).await?;
    Ok(Json(response))
}

async fn update_record(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.update(&ctx, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_record(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    controller.delete(&ctx, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Registro de manutenção removido com sucesso"
    })))
}
