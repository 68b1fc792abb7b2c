//! Camada de LLM do copiloto
//!
//! Modelo neutro de conversa (mensagens, chamadas de ferramenta e
//! declarações de ferramenta) e o trait `LlmProvider`, implementado
//! pelos clientes de OpenAI e Gemini. A orquestração fala só com o
//! trait; o formato de fio de cada provedor fica no módulo dele.

pub mod gemini;
pub mod openai;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Modelo usado quando a empresa não configurou um override
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Papel de uma mensagem na conversa
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

/// Chamada de ferramenta pedida pelo modelo
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Identificador da chamada (OpenAI); Gemini referencia pelo nome
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Mensagem neutra, independente de provedor
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// Preenchido em mensagens do assistente que pedem ferramentas
    pub tool_calls: Vec<ToolCall>,
    /// Preenchido em mensagens de resultado de ferramenta
    pub tool_call_id: Option<String>,
    pub tool_name: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(ChatRole::Assistant, content)
    }

    /// Mensagem do assistente que pede execuções de ferramenta
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// Resultado de uma ferramenta, respondendo a uma chamada específica
    pub fn tool_result(
        call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: ChatRole::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
            tool_name: Some(name.into()),
        }
    }

    fn plain(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
        }
    }
}

/// Declaração de ferramenta oferecida ao modelo (parameters em JSON Schema)
#[derive(Debug, Clone, Serialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Resultado de uma rodada de conversa
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl ChatOutcome {
    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Seam entre a orquestração e os provedores de LLM
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSchema]) -> Result<ChatOutcome>;
}

/// Provedores suportados pelo copiloto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Gemini,
}

impl AiProvider {
    /// Resolve o texto gravado em app_settings. Strings desconhecidas
    /// devolvem None e são rejeitadas antes de qualquer chamada de rede.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Some(AiProvider::OpenAi),
            "gemini" | "google" => Some(AiProvider::Gemini),
            _ => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::OpenAi => DEFAULT_OPENAI_MODEL,
            AiProvider::Gemini => DEFAULT_GEMINI_MODEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(AiProvider::from_str("openai"), Some(AiProvider::OpenAi));
        assert_eq!(AiProvider::from_str("OpenAI "), Some(AiProvider::OpenAi));
        assert_eq!(AiProvider::from_str("gemini"), Some(AiProvider::Gemini));
        assert_eq!(AiProvider::from_str("google"), Some(AiProvider::Gemini));
        assert_eq!(AiProvider::from_str("anthropic"), None);
        assert_eq!(AiProvider::from_str(""), None);
    }

    #[test]
    fn test_default_models() {
        assert_eq!(AiProvider::OpenAi.default_model(), DEFAULT_OPENAI_MODEL);
        assert_eq!(AiProvider::Gemini.default_model(), DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_outcome_wants_tools() {
        let without = ChatOutcome {
            content: "ok".to_string(),
            tool_calls: Vec::new(),
        };
        assert!(!without.wants_tools());

        let with = ChatOutcome {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: "call_1".to_string(),
                name: "buscar_motorista".to_string(),
                arguments: serde_json::json!({"nome": "Ana"}),
            }],
        };
        assert!(with.wants_tools());
    }
}
