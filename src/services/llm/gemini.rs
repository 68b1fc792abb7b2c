//! Cliente Gemini (Google Generative Language)
//!
//! Implementa `LlmProvider` sobre `models/{model}:generateContent`. O
//! protocolo de ferramentas usa partes `functionCall` (role "model") e
//! `functionResponse` (role "user"); não há ids de chamada, a
//! correlação é pelo nome da função.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ChatMessage, ChatOutcome, ChatRole, LlmProvider, ToolCall, ToolSchema};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireToolBlock>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    args: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireToolBlock {
    function_declarations: Vec<WireFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct WireFunctionDeclaration {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            client,
        }
    }

    fn build_request(messages: &[ChatMessage], tools: &[ToolSchema]) -> WireRequest {
        let mut system_instruction = None;
        let mut contents = Vec::new();

        for message in messages {
            match message.role {
                ChatRole::System => {
                    system_instruction = Some(WireContent {
                        role: None,
                        parts: vec![text_part(&message.content)],
                    });
                }
                ChatRole::User => contents.push(WireContent {
                    role: Some("user".to_string()),
                    parts: vec![text_part(&message.content)],
                }),
                ChatRole::Assistant => {
                    let mut parts = Vec::new();
                    if !message.content.is_empty() {
                        parts.push(text_part(&message.content));
                    }
                    for call in &message.tool_calls {
                        parts.push(WirePart {
                            text: None,
                            function_call: Some(WireFunctionCall {
                                name: call.name.clone(),
                                args: call.arguments.clone(),
                            }),
                            function_response: None,
                        });
                    }
                    contents.push(WireContent {
                        role: Some("model".to_string()),
                        parts,
                    });
                }
                ChatRole::Tool => {
                    let name = message.tool_name.clone().unwrap_or_default();
                    contents.push(WireContent {
                        role: Some("user".to_string()),
                        parts: vec![WirePart {
                            text: None,
                            function_call: None,
                            function_response: Some(WireFunctionResponse {
                                name,
                                response: json!({ "result": message.content }),
                            }),
                        }],
                    });
                }
            }
        }

        let tools = if tools.is_empty() {
            None
        } else {
            Some(vec![WireToolBlock {
                function_declarations: tools
                    .iter()
                    .map(|schema| WireFunctionDeclaration {
                        name: schema.name.clone(),
                        description: schema.description.clone(),
                        parameters: schema.parameters.clone(),
                    })
                    .collect(),
            }])
        };

        WireRequest {
            system_instruction,
            contents,
            tools,
        }
    }

    fn parse_candidate(candidate: WireCandidate) -> ChatOutcome {
        let mut content = String::new();
        let mut tool_calls = Vec::new();

        if let Some(wire_content) = candidate.content {
            for part in wire_content.parts {
                if let Some(text) = part.text {
                    content.push_str(&text);
                }
                if let Some(call) = part.function_call {
                    tool_calls.push(ToolCall {
                        // Gemini não emite ids; o nome identifica a chamada
                        id: call.name.clone(),
                        name: call.name,
                        arguments: call.args,
                    });
                }
            }
        }

        ChatOutcome {
            content,
            tool_calls,
        }
    }
}

fn text_part(text: &str) -> WirePart {
    WirePart {
        text: Some(text.to_string()),
        function_call: None,
        function_response: None,
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSchema]) -> Result<ChatOutcome> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL,
            self.model,
            urlencoding::encode(&self.api_key)
        );

        let request = Self::build_request(messages, tools);

        log::info!("🤖 Gemini chat: modelo={}, mensagens={}", self.model, messages.len());

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Gemini devolveu status {}: {}", status, body);
            return Err(anyhow!("Gemini devolveu status {}", status));
        }

        let parsed: WireResponse = response.json().await?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Resposta do Gemini sem candidates"))?;

        Ok(Self::parse_candidate(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_goes_to_system_instruction() {
        let messages = vec![
            ChatMessage::system("Você é o copiloto da frota."),
            ChatMessage::user("Quantos tratores temos?"),
        ];

        let request = GeminiClient::build_request(&messages, &[]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["systemInstruction"]["parts"][0]["text"],
            "Você é o copiloto da frota."
        );
        assert_eq!(value["contents"][0]["role"], "user");
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_tool_result_becomes_function_response() {
        let messages = vec![ChatMessage::tool_result(
            "contar_veiculos_por_tipo",
            "contar_veiculos_por_tipo",
            "3 veículos do tipo cavalo mecânico",
        )];

        let request = GeminiClient::build_request(&messages, &[]);
        let value = serde_json::to_value(&request).unwrap();

        let part = &value["contents"][0]["parts"][0];
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(part["functionResponse"]["name"], "contar_veiculos_por_tipo");
        assert_eq!(
            part["functionResponse"]["response"]["result"],
            "3 veículos do tipo cavalo mecânico"
        );
    }

    #[test]
    fn test_candidate_with_function_call_parses() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{
                        "functionCall": {
                            "name": "buscar_motorista",
                            "args": {"nome": "Ana Souza"}
                        }
                    }]
                }
            }]
        });

        let parsed: WireResponse = serde_json::from_value(raw).unwrap();
        let outcome = GeminiClient::parse_candidate(parsed.candidates.into_iter().next().unwrap());

        assert!(outcome.wants_tools());
        assert_eq!(outcome.tool_calls[0].name, "buscar_motorista");
        assert_eq!(outcome.tool_calls[0].arguments["nome"], "Ana Souza");
    }

    #[test]
    fn test_tool_declarations_serialize_camel_case() {
        let schema = ToolSchema {
            name: "abastecimentos_por_data".to_string(),
            description: "Abastecimentos de uma data".to_string(),
            parameters: json!({"type": "object", "properties": {"data": {"type": "string"}}}),
        };

        let request = GeminiClient::build_request(&[ChatMessage::user("oi")], &[schema]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["tools"][0]["functionDeclarations"][0]["name"],
            "abastecimentos_por_data"
        );
    }
}
