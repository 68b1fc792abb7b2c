//! Controller da trilha de auditoria
//!
//! Leitura somente - a escrita acontece nos outros controllers via
//! AuditService.

use sqlx::PgPool;

use crate::middleware::AuthContext;
use crate::models::audit::{AuditFilters, AuditLogResponse};
use crate::repositories::audit_repository::AuditRepository;
use crate::utils::errors::AppError;

pub struct AuditController {
    repository: AuditRepository,
}

impl AuditController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AuditRepository::new(pool),
        }
    }

    pub async fn list(
        &self,
        ctx: &AuthContext,
        filters: AuditFilters,
    ) -> Result<Vec<AuditLogResponse>, AppError> {
        let logs = self.repository.find_by_company(ctx.company_id, &filters).await?;
        Ok(logs.into_iter().map(AuditLogResponse::from).collect())
    }
}
