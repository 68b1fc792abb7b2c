use sqlx::PgPool;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;

/// Estado compartilhado da aplicação.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            pool,
            config,
            http_client,
        }
    }
}
