//! Cliente OpenAI (chat completions)
//!
//! Implementa `LlmProvider` sobre `POST /v1/chat/completions`, incluindo
//! o protocolo de tool calling: `tool_calls` na mensagem do assistente e
//! mensagens `role: "tool"` com `tool_call_id` na volta.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, ChatOutcome, ChatRole, LlmProvider, ToolCall, ToolSchema};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool<'a>>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: WireFunctionCall,
}

/// A OpenAI transporta os argumentos como string JSON, não como objeto
#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: &'a ToolSchema,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            client,
        }
    }

    fn to_wire_messages(messages: &[ChatMessage]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|message| match message.role {
                ChatRole::System => WireMessage {
                    role: "system".to_string(),
                    content: Some(message.content.clone()),
                    tool_calls: None,
                    tool_call_id: None,
                },
                ChatRole::User => WireMessage {
                    role: "user".to_string(),
                    content: Some(message.content.clone()),
                    tool_calls: None,
                    tool_call_id: None,
                },
                ChatRole::Assistant => {
                    let tool_calls = if message.tool_calls.is_empty() {
                        None
                    } else {
                        Some(
                            message
                                .tool_calls
                                .iter()
                                .map(|call| WireToolCall {
                                    id: call.id.clone(),
                                    call_type: "function".to_string(),
                                    function: WireFunctionCall {
                                        name: call.name.clone(),
                                        arguments: call.arguments.to_string(),
                                    },
                                })
                                .collect(),
                        )
                    };
                    WireMessage {
                        role: "assistant".to_string(),
                        content: if message.content.is_empty() {
                            None
                        } else {
                            Some(message.content.clone())
                        },
                        tool_calls,
                        tool_call_id: None,
                    }
                }
                ChatRole::Tool => WireMessage {
                    role: "tool".to_string(),
                    content: Some(message.content.clone()),
                    tool_calls: None,
                    tool_call_id: message.tool_call_id.clone(),
                },
            })
            .collect()
    }

    fn from_wire_message(message: WireMessage) -> ChatOutcome {
        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: serde_json::from_str(&call.function.arguments)
                    .unwrap_or(serde_json::Value::Null),
            })
            .collect();

        ChatOutcome {
            content: message.content.unwrap_or_default(),
            tool_calls,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSchema]) -> Result<ChatOutcome> {
        let wire_tools = if tools.is_empty() {
            None
        } else {
            Some(
                tools
                    .iter()
                    .map(|schema| WireTool {
                        tool_type: "function",
                        function: schema,
                    })
                    .collect(),
            )
        };

        let request = WireRequest {
            model: &self.model,
            messages: Self::to_wire_messages(messages),
            tools: wire_tools,
        };

        log::info!("🤖 OpenAI chat: modelo={}, mensagens={}", self.model, messages.len());

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ OpenAI devolveu status {}: {}", status, body);
            return Err(anyhow!("OpenAI devolveu status {}", status));
        }

        let parsed: WireResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Resposta da OpenAI sem choices"))?;

        Ok(Self::from_wire_message(choice.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_request_shape() {
        let schema = ToolSchema {
            name: "buscar_motorista".to_string(),
            description: "Busca motorista pelo nome".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {"nome": {"type": "string"}},
                "required": ["nome"]
            }),
        };

        let messages = vec![
            ChatMessage::system("Você é um assistente."),
            ChatMessage::user("Quem é o motorista Carlos?"),
        ];

        let request = WireRequest {
            model: "gpt-4o-mini",
            messages: OpenAiClient::to_wire_messages(&messages),
            tools: Some(vec![WireTool {
                tool_type: "function",
                function: &schema,
            }]),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "Quem é o motorista Carlos?");
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "buscar_motorista");
    }

    #[test]
    fn test_tool_result_message_carries_call_id() {
        let messages = vec![ChatMessage::tool_result(
            "call_9",
            "listar_motoristas_online",
            "Nenhum motorista online",
        )];

        let wire = OpenAiClient::to_wire_messages(&messages);
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value[0]["role"], "tool");
        assert_eq!(value[0]["tool_call_id"], "call_9");
        assert_eq!(value[0]["content"], "Nenhum motorista online");
    }

    #[test]
    fn test_response_with_tool_calls_parses() {
        let raw = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "contar_veiculos_por_tipo",
                            "arguments": "{\"tipo\": \"trator\"}"
                        }
                    }]
                }
            }]
        });

        let parsed: WireResponse = serde_json::from_value(raw).unwrap();
        let outcome =
            OpenAiClient::from_wire_message(parsed.choices.into_iter().next().unwrap().message);

        assert!(outcome.wants_tools());
        assert_eq!(outcome.tool_calls[0].name, "contar_veiculos_por_tipo");
        assert_eq!(outcome.tool_calls[0].arguments["tipo"], "trator");
    }

    #[test]
    fn test_assistant_echo_keeps_tool_calls() {
        let call = ToolCall {
            id: "call_2".to_string(),
            name: "abastecimentos_por_data".to_string(),
            arguments: json!({"data": "2025-03-10"}),
        };
        let messages = vec![ChatMessage::assistant_with_tools("", vec![call])];

        let value = serde_json::to_value(OpenAiClient::to_wire_messages(&messages)).unwrap();
        assert_eq!(value[0]["tool_calls"][0]["id"], "call_2");
        assert_eq!(
            value[0]["tool_calls"][0]["function"]["name"],
            "abastecimentos_por_data"
        );
        // content vazio é omitido quando há tool_calls
        assert!(value[0].get("content").is_none());
    }
}
