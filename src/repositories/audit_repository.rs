use sqlx::PgPool;
use uuid::Uuid;

use crate::models::audit::{AuditFilters, AuditLog};
use crate::utils::errors::AppError;

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(
        &self,
        company_id: Uuid,
        admin_id: Uuid,
        action: &str,
        entity: &str,
        entity_id: Option<Uuid>,
        details: Option<serde_json::Value>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (id, company_id, admin_id, action, entity, entity_id, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, now())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(admin_id)
        .bind(action)
        .bind(entity)
        .bind(entity_id)
        .bind(details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_company(
        &self,
        company_id: Uuid,
        filters: &AuditFilters,
    ) -> Result<Vec<AuditLog>, AppError> {
        let limit = filters.limit.unwrap_or(100).min(500);
        let offset = filters.offset.unwrap_or(0).max(0);

        let logs = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT * FROM audit_logs
            WHERE company_id = $1
              AND ($2::text IS NULL OR entity = $2)
              AND ($3::text IS NULL OR action = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(company_id)
        .bind(filters.entity.as_deref())
        .bind(filters.action.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}
