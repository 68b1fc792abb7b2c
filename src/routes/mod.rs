//! Rotas HTTP
//!
//! Cada entidade tem seu próprio router; aqui eles são montados sob
//! /api atrás do middleware de autenticação. Só o login e o /health
//! ficam fora do guarda.

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::json;

use crate::middleware::auth_middleware;
use crate::state::AppState;

pub mod admin_routes;
pub mod audit_routes;
pub mod auth_routes;
pub mod chat_routes;
pub mod copilot_routes;
pub mod driver_routes;
pub mod fueling_routes;
pub mod location_routes;
pub mod maintenance_routes;
pub mod settings_routes;
pub mod trailer_routes;
pub mod trip_routes;
pub mod vehicle_routes;

pub fn create_api_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/api/auth", auth_routes::create_session_router())
        .nest("/api/admins", admin_routes::create_admin_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/trailers", trailer_routes::create_trailer_router())
        .nest("/api/trips", trip_routes::create_trip_router())
        .nest("/api/maintenance", maintenance_routes::create_maintenance_router())
        .nest("/api/fuelings", fueling_routes::create_fueling_router())
        .nest("/api/locations", location_routes::create_location_router())
        .nest("/api/chat", chat_routes::create_chat_router())
        .nest("/api/audit", audit_routes::create_audit_router())
        .nest("/api/settings", settings_routes::create_settings_router())
        .nest("/api/copilot", copilot_routes::create_copilot_router())
        .route_layer(from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_login_router())
        .merge(protected)
}

/// Liveness do serviço
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-backoffice",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
