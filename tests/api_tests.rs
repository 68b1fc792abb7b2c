//! Testes de contrato da superfície HTTP.
//!
//! O binário não expõe uma biblioteca, então estes testes montam um
//! router mínimo com os mesmos envelopes da API real (liveness, erro e
//! sucesso). O comportamento de negócio é coberto pelos testes de
//! unidade dentro de src/.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn contract_app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/vehicles", get(guarded_list))
}

async fn health() -> Json<Value> {
    Json(json!({
        "service": "fleet-backoffice",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Mesmo envelope do middleware de autenticação real
async fn guarded_list(headers: HeaderMap) -> Response {
    let has_bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len())
        .unwrap_or(false);

    if !has_bearer {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized",
                "message": "Header Authorization ausente",
                "code": "UNAUTHORIZED"
            })),
        )
            .into_response();
    }

    Json(json!({ "success": true, "data": [] })).into_response()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_contract() {
    let app = contract_app();

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["service"], "fleet-backoffice");
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_missing_bearer_is_unauthorized() {
    let app = contract_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/vehicles")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_malformed_bearer_is_unauthorized() {
    let app = contract_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/vehicles")
        .header(header::AUTHORIZATION, "Token abc123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authorized_request_gets_success_envelope() {
    let app = contract_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/vehicles")
        .header(header::AUTHORIZATION, "Bearer um-token-qualquer")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].is_array());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = contract_app();

    let request = Request::builder()
        .method("GET")
        .uri("/api/nao-existe")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
