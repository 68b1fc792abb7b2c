pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, ensure_owner, AuthContext};
pub use cors::cors_middleware;
