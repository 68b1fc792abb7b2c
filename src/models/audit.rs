//! Modelo de AuditLog
//!
//! Trilha de auditoria das mutações feitas pelos administradores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLog {
    pub id: Uuid,
    pub company_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<Uuid>,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Filtros de consulta da trilha de auditoria
#[derive(Debug, Deserialize)]
pub struct AuditFilters {
    pub entity: Option<String>,
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    pub id: String,
    pub admin_id: Option<String>,
    pub action: String,
    pub entity: String,
    pub entity_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<AuditLog> for AuditLogResponse {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id.to_string(),
            admin_id: log.admin_id.map(|a| a.to_string()),
            action: log.action,
            entity: log.entity,
            entity_id: log.entity_id.map(|e| e.to_string()),
            details: log.details,
            created_at: log.created_at.to_rfc3339(),
        }
    }
}
