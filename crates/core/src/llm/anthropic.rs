//! Anthropic messages API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Role, TokenUsage};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const PROVIDER: &str = "anthropic";

// Anthropic rejects requests without max_tokens.
const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct WireResponse {
    model: String,
    content: Vec<WireContentBlock>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct WireContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct WireUsage {
    input_tokens: u32,
    output_tokens: u32,
}

pub struct AnthropicClient {
    model: String,
    api_key: String,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    fn build_body(&self, request: &CompletionRequest) -> WireRequest {
        // The system prompt rides in the top-level field, not the message list.
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: m.content.clone(),
            })
            .collect();

        WireRequest {
            model: self.model.clone(),
            messages,
            system: request.system.clone(),
            temperature: request.temperature,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.build_body(&request);

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport {
                provider: PROVIDER,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let wire: WireResponse = response.json().await.map_err(|e| LlmError::Decode {
            provider: PROVIDER,
            reason: e.to_string(),
        })?;

        let content: String = wire
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect();

        Ok(CompletionResponse {
            content,
            model: wire.model,
            usage: wire.usage.map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
            }),
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[test]
    fn test_system_prompt_is_top_level() {
        let client = AnthropicClient::new("claude-3-sonnet-20240229", "sk-ant-test");
        let request = CompletionRequest::prompt("System instruction", "Hello");

        let json = serde_json::to_value(client.build_body(&request)).unwrap();
        assert_eq!(json["system"], "System instruction");
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
    }

    #[test]
    fn test_default_max_tokens_applied() {
        let client = AnthropicClient::new("claude-3-sonnet-20240229", "sk-ant-test");
        let request = CompletionRequest {
            system: None,
            messages: vec![ChatMessage::user("Hello")],
            temperature: None,
            max_tokens: None,
        };

        let json = serde_json::to_value(client.build_body(&request)).unwrap();
        assert_eq!(json["max_tokens"], DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_temperature_passthrough() {
        let client = AnthropicClient::new("claude-3-sonnet-20240229", "sk-ant-test");
        let request = CompletionRequest::prompt("sys", "user").with_temperature(0.6);

        let json = serde_json::to_value(client.build_body(&request)).unwrap();
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.6).abs() < 1e-6);
    }
}
