//! # Studio Models
//!
//! Centralized LLM provider configuration. Each agent carries a
//! [`ModelConfig`] describing which provider, model, and sampling
//! temperature to use for its phase.

use crate::llm::{AnthropicClient, LlmClient, LlmError, OpenAiClient};
use serde::{Deserialize, Serialize};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Supported LLM providers
///
/// - OpenAI - `OPENAI_API_KEY`
/// - Anthropic (Claude) - `ANTHROPIC_API_KEY`
/// - OpenRouter (gateway, OpenAI-compatible) - `OPENROUTER_API_KEY`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    OpenRouter,
}

impl LlmProvider {
    /// Get all available providers
    pub fn all() -> Vec<LlmProvider> {
        vec![
            LlmProvider::OpenAI,
            LlmProvider::Anthropic,
            LlmProvider::OpenRouter,
        ]
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OpenAI",
            LlmProvider::Anthropic => "Anthropic",
            LlmProvider::OpenRouter => "OpenRouter",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn env_var(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Default model for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "gpt-4-turbo-preview",
            LlmProvider::Anthropic => "claude-3-sonnet-20240229",
            LlmProvider::OpenRouter => "openai/gpt-4-turbo-preview",
        }
    }

    /// Whether an API key for this provider is present in the environment.
    ///
    /// An absent key is not an error: it switches every agent on this
    /// provider onto the template fallback path.
    pub fn is_configured(&self) -> bool {
        std::env::var(self.env_var())
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }

    fn api_key(&self) -> Result<String, LlmError> {
        match std::env::var(self.env_var()) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LlmError::MissingApiKey(self.env_var())),
        }
    }
}

/// Configuration for LLM model selection
///
/// Used by every agent to decide which provider and model serve its phase.
/// The sampling temperature is part of the config because each agent wants
/// a different one (research runs cold, content creation runs hot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// LLM provider to use
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name (e.g., "gpt-4-turbo-preview")
    pub model: String,
    /// Sampling temperature for this agent's completions
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            model: LlmProvider::OpenAI.default_model().to_string(),
            temperature: 0.7,
        }
    }
}

impl ModelConfig {
    /// Create a new model config with the default provider (OpenAI)
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Create config for a specific provider using its default model
    pub fn with_provider(provider: LlmProvider) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Whether the configured provider has an API key available.
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Create an LLM client for the configured provider.
    ///
    /// Fails only when the provider's API key is absent.
    pub fn create_client(&self) -> Result<Box<dyn LlmClient>, LlmError> {
        let api_key = self.provider.api_key()?;
        match self.provider {
            LlmProvider::OpenAI => Ok(Box::new(OpenAiClient::new(&self.model, api_key))),
            LlmProvider::Anthropic => Ok(Box::new(AnthropicClient::new(&self.model, api_key))),
            LlmProvider::OpenRouter => Ok(Box::new(
                OpenAiClient::new(&self.model, api_key)
                    .with_endpoint(OPENROUTER_API_URL, "openrouter"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.provider, LlmProvider::OpenAI);
        assert!(config.model.contains("gpt"));
    }

    #[test]
    fn test_provider_display_names() {
        assert_eq!(LlmProvider::OpenAI.display_name(), "OpenAI");
        assert_eq!(LlmProvider::Anthropic.display_name(), "Anthropic");
        assert_eq!(LlmProvider::OpenRouter.display_name(), "OpenRouter");
    }

    #[test]
    fn test_env_vars() {
        assert_eq!(LlmProvider::OpenAI.env_var(), "OPENAI_API_KEY");
        assert_eq!(LlmProvider::Anthropic.env_var(), "ANTHROPIC_API_KEY");
        assert_eq!(LlmProvider::OpenRouter.env_var(), "OPENROUTER_API_KEY");
    }

    #[test]
    fn test_model_config_serialization() {
        let config = ModelConfig::with_provider(LlmProvider::Anthropic).with_temperature(0.2);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("anthropic"));
        assert!(json.contains("claude"));
        assert!(json.contains("0.2"));
    }

    #[test]
    fn test_provider_deserializes_lowercase() {
        let provider: LlmProvider = serde_json::from_str("\"openrouter\"").unwrap();
        assert_eq!(provider, LlmProvider::OpenRouter);
    }
}
