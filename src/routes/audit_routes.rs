use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::audit_controller::AuditController;
use crate::middleware::AuthContext;
use crate::models::audit::{AuditFilters, AuditLogResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_audit_router() -> Router<AppState> {
    Router::new().route("/", get(list_audit_logs))
}

async fn list_audit_logs(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Query(filters): Query<AuditFilters>,
) -> Result<Json<Vec<AuditLogResponse>>, AppError> {
    let controller = AuditController::new(state.pool.clone());
    let response = controller.list(&ctx, filters).await?;
    Ok(Json(response))
}
