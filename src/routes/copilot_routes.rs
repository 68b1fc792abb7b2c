use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::copilot_controller::CopilotController;
use crate::middleware::AuthContext;
use crate::models::copilot::{
    CopilotAnswerResponse, CopilotAskRequest, CopilotHistoryEntry, OperationsCopilotRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_copilot_router() -> Router<AppState> {
    Router::new()
        .route("/ask", post(ask))
        .route("/operations", post(operations))
        .route("/history", get(history))
}

async fn ask(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<CopilotAskRequest>,
) -> Result<Json<CopilotAnswerResponse>, AppError> {
    let controller = CopilotController::new(
        state.pool.clone(),
        state.config.clone(),
        state.http_client.clone(),
    );
    let response = controller.ask(&ctx, request).await?;
    Ok(Json(response))
}

async fn operations(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<OperationsCopilotRequest>,
) -> Result<Json<CopilotAnswerResponse>, AppError> {
    let controller = CopilotController::new(
        state.pool.clone(),
        state.config.clone(),
        state.http_client.clone(),
    );
    let response = controller.operations(&ctx, request).await?;
    Ok(Json(response))
}

async fn history(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<CopilotHistoryEntry>>, AppError> {
    let controller = CopilotController::new(
        state.pool.clone(),
        state.config.clone(),
        state.http_client.clone(),
    );
    let response = controller.history(&ctx).await?;
    Ok(Json(response))
}
