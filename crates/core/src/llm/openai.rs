//! OpenAI chat completions client.
//!
//! Also serves OpenRouter and any other OpenAI-compatible endpoint via
//! [`OpenAiClient::with_endpoint`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, TokenUsage};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Deserialize)]
struct WireChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

pub struct OpenAiClient {
    model: String,
    api_key: String,
    endpoint: String,
    provider: &'static str,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            endpoint: OPENAI_API_URL.to_string(),
            provider: "openai",
            http: reqwest::Client::new(),
        }
    }

    /// Point the client at an OpenAI-compatible endpoint (e.g. OpenRouter).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>, provider: &'static str) -> Self {
        self.endpoint = endpoint.into();
        self.provider = provider;
        self
    }

    fn build_body(&self, request: &CompletionRequest) -> WireRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(WireMessage {
                role: "system",
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| WireMessage {
            role: match m.role {
                super::Role::User => "user",
                super::Role::Assistant => "assistant",
            },
            content: m.content.clone(),
        }));

        WireRequest {
            model: self.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.build_body(&request);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport {
                provider: self.provider,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: self.provider,
                status: status.as_u16(),
                body,
            });
        }

        let wire: WireResponse = response.json().await.map_err(|e| LlmError::Decode {
            provider: self.provider,
            reason: e.to_string(),
        })?;

        let content = wire
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Decode {
                provider: self.provider,
                reason: "response contained no choices".to_string(),
            })?;

        Ok(CompletionResponse {
            content,
            model: wire.model,
            usage: wire.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
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
    use crate::llm::{ChatMessage, Role};

    #[test]
    fn test_request_body_shape() {
        let client = OpenAiClient::new("gpt-4-turbo-preview", "sk-test");
        let request = CompletionRequest {
            system: Some("Be concise.".to_string()),
            messages: vec![ChatMessage::user("Hello")],
            temperature: Some(0.7),
            max_tokens: Some(512),
        };

        let body = client.build_body(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4-turbo-preview");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "Be concise.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Hello");
        assert_eq!(json["max_tokens"], 512);
    }

    #[test]
    fn test_no_system_message_when_absent() {
        let client = OpenAiClient::new("gpt-4-turbo-preview", "sk-test");
        let request = CompletionRequest {
            system: None,
            messages: vec![
                ChatMessage::user("Hi"),
                ChatMessage {
                    role: Role::Assistant,
                    content: "Hello!".to_string(),
                },
            ],
            temperature: None,
            max_tokens: None,
        };

        let json = serde_json::to_value(client.build_body(&request)).unwrap();
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
        assert!(json.get("temperature").is_none() || json["temperature"].is_null());
    }

    #[test]
    fn test_endpoint_override() {
        let client = OpenAiClient::new("meta-llama/llama-3-70b", "sk-or-test").with_endpoint(
            "https://openrouter.ai/api/v1/chat/completions",
            "openrouter",
        );
        assert_eq!(client.provider, "openrouter");
        assert!(client.endpoint.contains("openrouter.ai"));
    }
}
