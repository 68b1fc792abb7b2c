//! Modelo de AppSettings
//!
//! Configuração por empresa: identidade visual do painel e o provedor de
//! IA do copiloto. A chave de API nunca sai do servidor - a response só
//! informa se existe uma chave cadastrada.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppSettings {
    pub id: Uuid,
    pub company_id: Uuid,
    pub app_name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub ai_provider: Option<String>,
    pub ai_model: Option<String>,
    pub ai_api_key_encrypted: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 2, max = 80))]
    pub app_name: Option<String>,

    #[validate(url)]
    pub logo_url: Option<String>,

    /// Cor em hex, ex. "#0F6CBD"
    #[validate(length(min = 4, max = 9))]
    pub primary_color: Option<String>,

    /// "openai" ou "gemini"
    pub ai_provider: Option<String>,

    pub ai_model: Option<String>,

    /// Chave de API em texto claro; é cifrada antes de persistir
    pub ai_api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub app_name: String,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub ai_provider: Option<String>,
    pub ai_model: Option<String>,
    pub has_api_key: bool,
    pub updated_at: String,
}

impl From<AppSettings> for SettingsResponse {
    fn from(settings: AppSettings) -> Self {
        Self {
            app_name: settings.app_name,
            logo_url: settings.logo_url,
            primary_color: settings.primary_color,
            ai_provider: settings.ai_provider,
            ai_model: settings.ai_model,
            has_api_key: settings.ai_api_key_encrypted.is_some(),
            updated_at: settings.updated_at.to_rfc3339(),
        }
    }
}

/// Configuração exposta para os clientes (mapa e push)
#[derive(Debug, Serialize)]
pub struct ClientConfigResponse {
    pub maps_api_key: String,
    pub push_public_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_never_carries_key() {
        let settings = AppSettings {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            app_name: "Frota Azul".to_string(),
            logo_url: None,
            primary_color: Some("#0F6CBD".to_string()),
            ai_provider: Some("openai".to_string()),
            ai_model: None,
            ai_api_key_encrypted: Some("AAAA".to_string()),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(SettingsResponse::from(settings)).unwrap();
        assert_eq!(json["has_api_key"], true);
        assert!(json.get("ai_api_key_encrypted").is_none());
    }
}
