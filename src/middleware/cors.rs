use tower_http::cors::CorsLayer;

/// CORS permissivo: o painel web e o aplicativo do motorista são
/// servidos de origens distintas do backend.
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
