use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::admin::{AdminResponse, LoginPayload, LoginRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

/// Rotas de autenticação abertas (sem bearer)
pub fn create_login_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Rotas de sessão, atrás do middleware de autenticação
pub fn create_session_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginPayload>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let payload = controller.login(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        payload,
        "Login realizado com sucesso".to_string(),
    )))
}

async fn me(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<AdminResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), JwtConfig::from(&state.config));
    let response = controller.me(&ctx).await?;
    Ok(Json(response))
}
