use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::fueling_controller::FuelingController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::fueling::{CreateFuelingRequest, FuelingFilters, FuelingResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fueling_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fueling))
        .route("/", get(list_fuelings))
        .route("/:id", delete(delete_fueling))
}

async fn create_fueling(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CreateFuelingRequest>,
) -> Result<Json<ApiResponse<FuelingResponse>>, AppError> {
    let controller = FuelingController::new(state.pool.clone());
    let response = controller.create(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// Listagem pela view fueling_report, já com placa e motorista
async fn list_fuelings(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(filters): Query<FuelingFilters>,
) -> Result<Json<Vec<FuelingResponse>>, AppError> {
    let controller = FuelingController::new(state.pool.clone());
    let response = controller.list(&ctx, filters).await?;
    Ok(Json(response))
}

async fn delete_fueling(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = FuelingController::new(state.pool.clone());
    controller.delete(&ctx, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Abastecimento removido com sucesso"
    })))
}
