use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::admin::{AdminResponse, CreateAdminRequest, UpdateAdminRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_admins))
        .route("/", post(create_admin))
        .route("/:id", put(update_admin))
        .route("/:id", delete(delete_admin))
}

async fn list_admins(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<AdminResponse>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    let response = controller.list(&ctx).await?;
    Ok(Json(response))
}

async fn create_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<Json<ApiResponse<AdminResponse>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    let response = controller.create(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn update_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<Json<ApiResponse<AdminResponse>>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    let response = controller.update(&ctx, id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn delete_admin(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = AdminController::new(state.pool.clone());
    controller.delete(&ctx, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Administrador removido com sucesso"
    })))
}
