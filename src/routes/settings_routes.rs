use axum::{
    extract::State,
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::settings_controller::SettingsController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::settings::{ClientConfigResponse, SettingsResponse, UpdateSettingsRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_settings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings))
        .route("/", put(update_settings))
        .route("/client-config", get(client_config))
}

async fn get_settings(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<SettingsResponse>, AppError> {
    let controller = SettingsController::new(state.pool.clone(), state.config.clone());
    let response = controller.get(&ctx).await?;
    Ok(Json(response))
}

async fn update_settings(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<SettingsResponse>>, AppError> {
    let controller = SettingsController::new(state.pool.clone(), state.config.clone());
    let response = controller.update(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

/// Chaves públicas que os apps precisam (mapa e push)
async fn client_config(
    State(state): State<AppState>,
) -> Result<Json<ClientConfigResponse>, AppError> {
    let controller = SettingsController::new(state.pool.clone(), state.config.clone());
    let response = controller.client_config()?;
    Ok(Json(response))
}
