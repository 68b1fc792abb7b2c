//! Controller de AppSettings
//!
//! Identidade visual do painel e provedor de IA, por empresa. A chave
//! de API do provedor chega em texto claro, é cifrada com a chave
//! mestra do servidor e nunca volta em nenhuma response.

use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::AuthContext;
use crate::models::settings::{ClientConfigResponse, SettingsResponse, UpdateSettingsRequest};
use crate::repositories::settings_repository::{SettingsRepository, DEFAULT_APP_NAME};
use crate::services::audit_service::AuditService;
use crate::services::llm::AiProvider;
use crate::utils::crypto;
use crate::utils::errors::AppError;

pub struct SettingsController {
    repository: SettingsRepository,
    audit: AuditService,
    config: EnvironmentConfig,
}

impl SettingsController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: SettingsRepository::new(pool.clone()),
            audit: AuditService::new(pool),
            config,
        }
    }

    /// Empresa sem registro recebe os valores padrão.
    pub async fn get(&self, ctx: &AuthContext) -> Result<SettingsResponse, AppError> {
        let settings = self.repository.find_by_company(ctx.company_id).await?;

        Ok(match settings {
            Some(settings) => SettingsResponse::from(settings),
            None => SettingsResponse {
                app_name: DEFAULT_APP_NAME.to_string(),
                logo_url: None,
                primary_color: None,
                ai_provider: None,
                ai_model: None,
                has_api_key: false,
                updated_at: Utc::now().to_rfc3339(),
            },
        })
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        request: UpdateSettingsRequest,
    ) -> Result<SettingsResponse, AppError> {
        request.validate()?;

        if let Some(provider) = &request.ai_provider {
            if AiProvider::from_str(provider).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Provedor de IA não suportado: {}",
                    provider
                )));
            }
        }

        let encrypted_key = match &request.ai_api_key {
            Some(key) => Some(crypto::encrypt_secret(
                key,
                &self.config.settings_encryption_key,
            )?),
            None => None,
        };

        // Auditoria registra os campos alterados, nunca o valor da chave
        let mut changed: Vec<&str> = Vec::new();
        if request.app_name.is_some() {
            changed.push("app_name");
        }
        if request.logo_url.is_some() {
            changed.push("logo_url");
        }
        if request.primary_color.is_some() {
            changed.push("primary_color");
        }
        if request.ai_provider.is_some() {
            changed.push("ai_provider");
        }
        if request.ai_model.is_some() {
            changed.push("ai_model");
        }
        if request.ai_api_key.is_some() {
            changed.push("ai_api_key");
        }

        let settings = self
            .repository
            .upsert(
                ctx.company_id,
                request.app_name,
                request.logo_url,
                request.primary_color,
                request.ai_provider,
                request.ai_model,
                encrypted_key,
            )
            .await?;

        self.audit
            .record(
                ctx,
                "update",
                "settings",
                Some(settings.id),
                Some(json!({ "fields": changed })),
            )
            .await;

        Ok(SettingsResponse::from(settings))
    }

    /// Configuração servida aos clientes web e mobile.
    pub fn client_config(&self) -> Result<ClientConfigResponse, AppError> {
        let maps_api_key = self.config.maps_api_key.clone().ok_or_else(|| {
            AppError::Configuration(
                "Chave do Google Maps não configurada. Defina MAPS_API_KEY no ambiente do servidor"
                    .to_string(),
            )
        })?;

        Ok(ClientConfigResponse {
            maps_api_key,
            push_public_key: self.config.push_public_key.clone(),
        })
    }
}
