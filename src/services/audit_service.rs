//! Registro de auditoria
//!
//! As mutações dos controllers passam por aqui. A gravação é
//! fire-and-forget: se a trilha falhar, a operação de negócio já
//! aconteceu e não é desfeita - fica só o warning no log.

use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::AuthContext;
use crate::repositories::audit_repository::AuditRepository;

pub struct AuditService {
    repository: AuditRepository,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AuditRepository::new(pool),
        }
    }

    /// Grava uma entrada de auditoria sem propagar falhas.
    pub async fn record(
        &self,
        ctx: &AuthContext,
        action: &str,
        entity: &str,
        entity_id: Option<Uuid>,
        details: Option<serde_json::Value>,
    ) {
        if let Err(e) = self
            .repository
            .record(ctx.company_id, ctx.admin_id, action, entity, entity_id, details)
            .await
        {
            log::warn!("⚠️ Falha ao gravar auditoria de {} {}: {}", action, entity, e);
        }
    }
}
