//! # Content Creator Agent
//!
//! Produces platform-optimized content for every requested platform. The
//! live path makes one LLM call for all platforms and parses a JSON
//! object out of the response; missing platforms are filled from the
//! template generator so the result always covers the full request.

use crate::agents::outcome::{AgentOutcome, DegradeCause};
use crate::agents::rate::RateGate;
use crate::agents::{extract_json, fallback, prompts, AgentCapabilities, ContentPhase};
use crate::llm::CompletionRequest;
use crate::models::ModelConfig;
use crate::platforms::Platform;
use crate::workflow::request::ContentOptions;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Output of the content creation phase, keyed by platform display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentData {
    pub content: BTreeMap<String, String>,
}

pub struct ContentCreatorAgent {
    config: ModelConfig,
    gate: Arc<RateGate>,
}

impl ContentCreatorAgent {
    pub fn new(config: ModelConfig, gate: Arc<RateGate>) -> Self {
        Self { config, gate }
    }

    pub fn capabilities() -> AgentCapabilities {
        AgentCapabilities {
            capabilities: &[
                "Platform-optimized content creation",
                "Hashtag generation",
                "Engagement enhancement",
                "Content formatting",
            ],
            tools: &[
                "optimize_for_platform",
                "generate_hashtags",
                "enhance_engagement",
                "format_content",
            ],
        }
    }

    /// Create content for every requested platform. Never fails.
    pub async fn execute_content_creation(
        &self,
        topic: &str,
        tone: &str,
        platforms: &[Platform],
        research_brief: &str,
        options: &ContentOptions,
    ) -> AgentOutcome<ContentData> {
        if !self.config.is_configured() {
            return AgentOutcome::Degraded {
                data: ContentData {
                    content: fallback::mock_content(topic, tone, platforms, options),
                },
                cause: DegradeCause::Unconfigured {
                    env_var: self.config.provider.env_var(),
                },
            };
        }

        match self
            .create_live(topic, tone, platforms, research_brief, options)
            .await
        {
            Ok(data) => AgentOutcome::Real(data),
            Err(e) => {
                tracing::warn!(topic, error = %e, "content creation fell back to templates");
                AgentOutcome::Degraded {
                    data: ContentData {
                        content: fallback::mock_content(topic, tone, platforms, options),
                    },
                    cause: DegradeCause::Failed(e.to_string()),
                }
            }
        }
    }

    async fn create_live(
        &self,
        topic: &str,
        tone: &str,
        platforms: &[Platform],
        research_brief: &str,
        options: &ContentOptions,
    ) -> Result<ContentData> {
        let client = self.config.create_client()?;
        let prompt = prompts::content_task(topic, tone, platforms, research_brief, options);

        self.gate.acquire().await;
        let response = client
            .complete(
                CompletionRequest::prompt(prompts::CONTENT_SYSTEM, prompt)
                    .with_temperature(self.config.temperature),
            )
            .await?;

        let parsed: BTreeMap<String, String> =
            extract_json(&response.content).unwrap_or_default();

        let mut content = BTreeMap::new();
        for platform in platforms {
            let name = platform.display_name().to_string();
            let body = parsed
                .get(&name)
                .cloned()
                .unwrap_or_else(|| fallback::platform_content(topic, tone, *platform, options));
            content.insert(name, optimize_for_platform(*platform, &body));
        }

        Ok(ContentData { content })
    }
}

#[async_trait]
impl ContentPhase for ContentCreatorAgent {
    async fn run(
        &self,
        topic: String,
        tone: String,
        platforms: Vec<Platform>,
        research_brief: String,
        options: ContentOptions,
    ) -> Result<AgentOutcome<ContentData>> {
        Ok(self
            .execute_content_creation(&topic, &tone, &platforms, &research_brief, &options)
            .await)
    }
}

/// Apply per-platform constraints: threading for Twitter, length clamps
/// and light formatting elsewhere.
pub(crate) fn optimize_for_platform(platform: Platform, content: &str) -> String {
    let spec = platform.spec();
    match platform {
        Platform::Twitter if content.len() > spec.max_length => twitter_thread(content),
        Platform::Instagram => sparkle_lines(content),
        _ => clamp(content, spec.max_length),
    }
}

fn clamp(content: &str, max_length: usize) -> String {
    if content.len() <= max_length {
        return content.to_string();
    }
    let mut cut = max_length.saturating_sub(3);
    while cut > 0 && !content.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &content[..cut])
}

/// Break long content into a numbered thread.
pub(crate) fn twitter_thread(content: &str) -> String {
    // Leave room for the "n/m " prefix under the 280 limit.
    const TWEET_BUDGET: usize = 250;

    let mut tweets: Vec<String> = Vec::new();
    let mut current = String::new();
    for sentence in content.split_inclusive(['.', '!', '?']) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if !current.is_empty() && current.len() + sentence.len() + 1 > TWEET_BUDGET {
            tweets.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
    }
    if !current.is_empty() {
        tweets.push(current);
    }

    let total = tweets.len();
    tweets
        .iter()
        .enumerate()
        .map(|(i, tweet)| format!("{}/{} {}", i + 1, total, tweet))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn sparkle_lines(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() || line.trim_start().starts_with('✨') {
                line.to_string()
            } else {
                format!("✨ {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_short_content_untouched() {
        assert_eq!(clamp("hello", 100), "hello");
    }

    #[test]
    fn test_clamp_long_content() {
        let clamped = clamp(&"a".repeat(500), 100);
        assert_eq!(clamped.len(), 100);
        assert!(clamped.ends_with("..."));
    }

    #[test]
    fn test_twitter_thread_numbering() {
        let long = "This is sentence one. ".repeat(40);
        let thread = twitter_thread(&long);
        assert!(thread.starts_with("1/"));
        let tweets: Vec<&str> = thread.split("\n\n").collect();
        assert!(tweets.len() > 1);
        for tweet in &tweets {
            assert!(tweet.len() <= 280, "tweet too long: {}", tweet.len());
        }
    }

    #[test]
    fn test_short_twitter_content_not_threaded() {
        let optimized = optimize_for_platform(Platform::Twitter, "A short take.");
        assert_eq!(optimized, "A short take.");
    }

    #[test]
    fn test_instagram_gets_sparkles() {
        let optimized = optimize_for_platform(Platform::Instagram, "line one\n\nline two");
        assert!(optimized.contains("✨ line one"));
        assert!(optimized.contains("✨ line two"));
    }
}
