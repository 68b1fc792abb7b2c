//! Modelo de Chat
//!
//! Conversas entre administrador e motorista. Anexos de imagem são
//! embutidos no corpo da mensagem em base64, entre os marcadores
//! `[img]...[/img]` - convenção herdada do app e mantida aqui.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref INLINE_IMAGE_RE: Regex =
        Regex::new(r"(?s)\[img\](.*?)\[/img\]").expect("regex de marcador de imagem");
}

/// Conversa admin <-> motorista - mapeia a tabela chat_threads
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatThread {
    pub id: Uuid,
    pub company_id: Uuid,
    pub admin_id: Uuid,
    pub driver_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mensagem de uma conversa - mapeia a tabela chat_messages
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub sender: String,
    pub sender_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Request para abrir (ou reaproveitar) a conversa com um motorista
#[derive(Debug, Deserialize, Validate)]
pub struct OpenThreadRequest {
    pub driver_id: Uuid,
}

/// Request para enviar uma mensagem
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub thread_id: Uuid,

    #[validate(length(max = 10000))]
    pub body: String,

    /// Imagem opcional já codificada em base64
    pub image_base64: Option<String>,
}

/// Filtro de paginação de mensagens
#[derive(Debug, Deserialize)]
pub struct MessageFilters {
    /// Devolve só mensagens criadas depois deste instante
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ThreadResponse {
    pub id: String,
    pub driver_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ChatThread> for ThreadResponse {
    fn from(thread: ChatThread) -> Self {
        Self {
            id: thread.id.to_string(),
            driver_id: thread.driver_id.to_string(),
            created_at: thread.created_at.to_rfc3339(),
            updated_at: thread.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub thread_id: String,
    pub sender: String,
    pub sender_id: String,
    /// Texto da mensagem sem o marcador de imagem
    pub text: String,
    /// Base64 da imagem embutida, se houver
    pub image_base64: Option<String>,
    pub created_at: String,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        let (text, image) = split_inline_image(&message.body);
        Self {
            id: message.id.to_string(),
            thread_id: message.thread_id.to_string(),
            sender: message.sender,
            sender_id: message.sender_id.to_string(),
            text,
            image_base64: image,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

/// Embutir uma imagem base64 no corpo da mensagem
pub fn embed_inline_image(body: &str, image_base64: &str) -> String {
    format!("{}[img]{}[/img]", body, image_base64)
}

/// Separar texto e imagem embutida de um corpo de mensagem
pub fn split_inline_image(body: &str) -> (String, Option<String>) {
    match INLINE_IMAGE_RE.captures(body) {
        Some(caps) => {
            let image = caps.get(1).map(|m| m.as_str().to_string());
            let text = INLINE_IMAGE_RE.replace(body, "").trim().to_string();
            (text, image)
        }
        None => (body.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_and_split_image() {
        let body = embed_inline_image("Foto do pneu", "aGVsbG8=");
        assert_eq!(body, "Foto do pneu[img]aGVsbG8=[/img]");

        let (text, image) = split_inline_image(&body);
        assert_eq!(text, "Foto do pneu");
        assert_eq!(image.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn test_split_without_image() {
        let (text, image) = split_inline_image("Mensagem simples");
        assert_eq!(text, "Mensagem simples");
        assert!(image.is_none());
    }

    #[test]
    fn test_split_image_only() {
        let body = embed_inline_image("", "Zm90bw==");
        let (text, image) = split_inline_image(&body);
        assert_eq!(text, "");
        assert_eq!(image.as_deref(), Some("Zm90bw=="));
    }

    #[test]
    fn test_response_strips_marker() {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            thread_id: Uuid::new_v4(),
            sender: "admin".to_string(),
            sender_id: Uuid::new_v4(),
            body: embed_inline_image("Segue o comprovante", "YWJj"),
            created_at: Utc::now(),
        };

        let response = ChatMessageResponse::from(message);
        assert_eq!(response.text, "Segue o comprovante");
        assert_eq!(response.image_base64.as_deref(), Some("YWJj"));
    }
}
