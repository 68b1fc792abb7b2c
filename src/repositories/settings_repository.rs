use sqlx::PgPool;
use uuid::Uuid;

use crate::models::settings::AppSettings;
use crate::utils::errors::AppError;

/// Nome de aplicativo usado enquanto a empresa não personalizou nada.
pub const DEFAULT_APP_NAME: &str = "Gestão de Frota";

pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Option<AppSettings>, AppError> {
        let settings =
            sqlx::query_as::<_, AppSettings>("SELECT * FROM app_settings WHERE company_id = $1")
                .bind(company_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(settings)
    }

    /// Upsert por empresa. Campos omitidos na atualização preservam o
    /// valor atual via COALESCE.
    pub async fn upsert(
        &self,
        company_id: Uuid,
        app_name: Option<String>,
        logo_url: Option<String>,
        primary_color: Option<String>,
        ai_provider: Option<String>,
        ai_model: Option<String>,
        ai_api_key_encrypted: Option<String>,
    ) -> Result<AppSettings, AppError> {
        let settings = sqlx::query_as::<_, AppSettings>(
            r#"
            INSERT INTO app_settings (id, company_id, app_name, logo_url, primary_color, ai_provider, ai_model, ai_api_key_encrypted, updated_at)
            VALUES ($1, $2, COALESCE($3, $9), $4, $5, $6, $7, $8, now())
            ON CONFLICT (company_id) DO UPDATE SET
                app_name = COALESCE($3, app_settings.app_name),
                logo_url = COALESCE($4, app_settings.logo_url),
                primary_color = COALESCE($5, app_settings.primary_color),
                ai_provider = COALESCE($6, app_settings.ai_provider),
                ai_model = COALESCE($7, app_settings.ai_model),
                ai_api_key_encrypted = COALESCE($8, app_settings.ai_api_key_encrypted),
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(app_name)
        .bind(logo_url)
        .bind(primary_color)
        .bind(ai_provider)
        .bind(ai_model)
        .bind(ai_api_key_encrypted)
        .bind(DEFAULT_APP_NAME)
        .fetch_one(&self.pool)
        .await?;

        Ok(settings)
    }
}
