//! Modelos do copiloto
//!
//! Contratos dos dois endpoints de IA e a tabela de histórico de
//! conversa do copiloto conversacional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Request do copiloto conversacional
#[derive(Debug, Deserialize, Validate)]
pub struct CopilotAskRequest {
    #[validate(length(min = 1, max = 4000))]
    pub question: String,
}

/// Request do copiloto de operações (com ferramentas)
#[derive(Debug, Deserialize, Validate)]
pub struct OperationsCopilotRequest {
    pub empresa_id: Uuid,

    #[validate(length(min = 1, max = 4000))]
    pub mensagem: String,
}

/// Response comum dos dois copilotos
#[derive(Debug, Serialize, Deserialize)]
pub struct CopilotAnswerResponse {
    pub answer: String,
}

/// Mensagem persistida da conversa - mapeia a tabela copilot_messages
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CopilotMessage {
    pub id: Uuid,
    pub company_id: Uuid,
    pub admin_id: Uuid,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CopilotHistoryEntry {
    pub role: String,
    pub content: String,
    pub created_at: String,
}

impl From<CopilotMessage> for CopilotHistoryEntry {
    fn from(message: CopilotMessage) -> Self {
        Self {
            role: message.role,
            content: message.content,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}
