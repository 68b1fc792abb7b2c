//! Controller do copiloto
//!
//! Superfície HTTP dos dois assistentes de IA. O endpoint de operações
//! recebe o `empresa_id` no corpo por contrato com o app, mas a empresa
//! efetiva é sempre a do token - divergência é rejeitada.

use sqlx::PgPool;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::middleware::AuthContext;
use crate::models::copilot::{
    CopilotAnswerResponse, CopilotAskRequest, CopilotHistoryEntry, OperationsCopilotRequest,
};
use crate::services::copilot_service::CopilotService;
use crate::utils::errors::AppError;

const HISTORY_LIMIT: i64 = 50;

pub struct CopilotController {
    service: CopilotService,
}

impl CopilotController {
    pub fn new(pool: PgPool, config: EnvironmentConfig, http_client: reqwest::Client) -> Self {
        Self {
            service: CopilotService::new(pool, config, http_client),
        }
    }

    pub async fn ask(
        &self,
        ctx: &AuthContext,
        request: CopilotAskRequest,
    ) -> Result<CopilotAnswerResponse, AppError> {
        request.validate()?;

        let answer = self
            .service
            .ask(ctx.company_id, ctx.admin_id, &request.question)
            .await?;

        Ok(CopilotAnswerResponse { answer })
    }

    pub async fn operations(
        &self,
        ctx: &AuthContext,
        request: OperationsCopilotRequest,
    ) -> Result<CopilotAnswerResponse, AppError> {
        request.validate()?;

        if request.empresa_id != ctx.company_id {
            return Err(AppError::Forbidden(
                "empresa_id não corresponde à empresa do token".to_string(),
            ));
        }

        let answer = self
            .service
            .operations(ctx.company_id, &request.mensagem)
            .await?;

        Ok(CopilotAnswerResponse { answer })
    }

    pub async fn history(&self, ctx: &AuthContext) -> Result<Vec<CopilotHistoryEntry>, AppError> {
        let messages = self
            .service
            .history(ctx.company_id, ctx.admin_id, HISTORY_LIMIT)
            .await?;

        Ok(messages.into_iter().map(CopilotHistoryEntry::from).collect())
    }
}
