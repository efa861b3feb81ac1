//! # Settings
//!
//! Environment-driven configuration, loaded once at process start.
//! Missing LLM keys are normal: they switch the affected agents onto
//! their template fallback path instead of the live LLM path.

use serde::Serialize;

/// Process-wide settings.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    // Application
    pub app_name: String,
    pub version: String,
    pub debug: bool,

    // Database (reserved; no persistence layer is wired up yet)
    pub database_url: String,

    // LLM APIs - presence flags only, the keys themselves stay in the
    // environment and are read by the provider clients
    pub openai_configured: bool,
    pub anthropic_configured: bool,
    pub openrouter_configured: bool,

    // Rate limiting
    pub crew_max_rpm: u32,

    // Agent settings
    pub max_research_sources: usize,
    pub max_lead_results: usize,
    pub content_generation_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Content Studio".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            debug: true,
            database_url: "sqlite://./content_studio.db".to_string(),
            openai_configured: false,
            anthropic_configured: false,
            openrouter_configured: false,
            crew_max_rpm: 10,
            max_research_sources: 10,
            max_lead_results: 50,
            content_generation_timeout_secs: 120,
        }
    }
}

impl Settings {
    /// Load settings from the environment, falling back to defaults for
    /// anything unset or unparseable.
    pub fn from_env() -> Self {
        use crate::models::LlmProvider;

        let defaults = Self::default();
        Self {
            app_name: env_string("APP_NAME", &defaults.app_name),
            debug: env_flag("DEBUG", defaults.debug),
            database_url: env_string("DATABASE_URL", &defaults.database_url),
            openai_configured: LlmProvider::OpenAI.is_configured(),
            anthropic_configured: LlmProvider::Anthropic.is_configured(),
            openrouter_configured: LlmProvider::OpenRouter.is_configured(),
            crew_max_rpm: env_parse("CREW_MAX_RPM", defaults.crew_max_rpm),
            max_research_sources: env_parse("MAX_RESEARCH_SOURCES", defaults.max_research_sources),
            max_lead_results: env_parse("MAX_LEAD_RESULTS", defaults.max_lead_results),
            content_generation_timeout_secs: env_parse(
                "CONTENT_GENERATION_TIMEOUT",
                defaults.content_generation_timeout_secs,
            ),
            ..defaults
        }
    }

    /// Whether any LLM provider is usable.
    pub fn any_provider_configured(&self) -> bool {
        self.openai_configured || self.anthropic_configured || self.openrouter_configured
    }
}

fn env_string(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.crew_max_rpm, 10);
        assert_eq!(settings.max_research_sources, 10);
        assert_eq!(settings.max_lead_results, 50);
        assert_eq!(settings.content_generation_timeout_secs, 120);
        assert!(!settings.any_provider_configured());
    }

    #[test]
    fn test_env_flag_parsing() {
        std::env::set_var("STUDIO_TEST_FLAG_ON", "true");
        std::env::set_var("STUDIO_TEST_FLAG_OFF", "0");
        assert!(env_flag("STUDIO_TEST_FLAG_ON", false));
        assert!(!env_flag("STUDIO_TEST_FLAG_OFF", true));
        assert!(env_flag("STUDIO_TEST_FLAG_UNSET", true));
    }

    #[test]
    fn test_env_parse_falls_back_on_garbage() {
        std::env::set_var("STUDIO_TEST_RPM", "not-a-number");
        assert_eq!(env_parse("STUDIO_TEST_RPM", 10u32), 10);
    }
}
