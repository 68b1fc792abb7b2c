use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::chat_controller::ChatController;
use crate::dto::common::ApiResponse;
use crate::middleware::AuthContext;
use crate::models::chat::{
    ChatMessageResponse, MessageFilters, OpenThreadRequest, SendMessageRequest, ThreadResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/threads", post(open_thread))
        .route("/threads", get(list_threads))
        .route("/threads/:id/messages", get(list_messages))
        .route("/messages", post(send_message))
}

/// Abre a conversa com um motorista; repetir devolve a mesma thread
async fn open_thread(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<OpenThreadRequest>,
) -> Result<Json<ApiResponse<ThreadResponse>>, AppError> {
    let controller = ChatController::new(state.pool.clone());
    let response = controller.open_thread(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn list_threads(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Vec<ThreadResponse>>, AppError> {
    let controller = ChatController::new(state.pool.clone());
    let response = controller.list_threads(&ctx).await?;
    Ok(Json(response))
}

async fn list_messages(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Query(filters): Query<MessageFilters>,
) -> Result<Json<Vec<ChatMessageResponse>>, AppError> {
    let controller = ChatController::new(state.pool.clone());
    let response = controller.messages(&ctx, id, filters).await?;
    Ok(Json(response))
}

async fn send_message(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<ChatMessageResponse>>, AppError> {
    let controller = ChatController::new(state.pool.clone());
    let response = controller.send_message(&ctx, request).await?;
    Ok(Json(ApiResponse::success(response)))
}
