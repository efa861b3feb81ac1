//! # Research Agent
//!
//! Searches the web, pulls readable text from the top hits, and asks the
//! LLM for a cited research brief. Falls back to a templated brief when
//! the live path is unavailable.

use crate::agents::outcome::{AgentOutcome, DegradeCause};
use crate::agents::rate::RateGate;
use crate::agents::{fallback, prompts, AgentCapabilities, ResearchPhase};
use crate::llm::CompletionRequest;
use crate::models::ModelConfig;
use crate::platforms::Platform;
use crate::tools::{fetch_page, WebSearchTool};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::OnceLock;

// How many search hits to read before prompting.
const PAGES_TO_FETCH: usize = 2;
const SEARCH_RESULTS: usize = 5;

/// Output of the research phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchData {
    pub research_brief: String,
    pub sources: Vec<String>,
}

pub struct ResearchAgent {
    config: ModelConfig,
    search: WebSearchTool,
    http: reqwest::Client,
    gate: Arc<RateGate>,
    max_sources: usize,
}

impl ResearchAgent {
    pub fn new(config: ModelConfig, gate: Arc<RateGate>, max_sources: usize) -> Self {
        Self {
            config,
            search: WebSearchTool::new(),
            http: reqwest::Client::new(),
            gate,
            max_sources,
        }
    }

    pub fn capabilities() -> AgentCapabilities {
        AgentCapabilities {
            capabilities: &[
                "Web search and analysis",
                "Trend analysis",
                "Content analysis",
                "Source citation",
            ],
            tools: &["web_search", "analyze_content", "trend_analysis"],
        }
    }

    /// Research a topic. Never fails: any problem downgrades to a
    /// templated brief.
    pub async fn execute_research(
        &self,
        topic: &str,
        platforms: &[Platform],
    ) -> AgentOutcome<ResearchData> {
        if !self.config.is_configured() {
            return AgentOutcome::Degraded {
                data: fallback::research_brief(topic, platforms),
                cause: DegradeCause::Unconfigured {
                    env_var: self.config.provider.env_var(),
                },
            };
        }

        match self.research_live(topic, platforms).await {
            Ok(data) => AgentOutcome::Real(data),
            Err(e) => {
                tracing::warn!(topic, error = %e, "research fell back to template brief");
                AgentOutcome::Degraded {
                    data: fallback::research_brief(topic, platforms),
                    cause: DegradeCause::Failed(e.to_string()),
                }
            }
        }
    }

    async fn research_live(&self, topic: &str, platforms: &[Platform]) -> Result<ResearchData> {
        let client = self.config.create_client()?;

        let hits = self.search.search(topic, SEARCH_RESULTS).await?;

        let mut findings = String::new();
        for hit in &hits {
            findings.push_str(&format!("- {} ({}): {}\n", hit.title, hit.url, hit.snippet));
        }
        for hit in hits.iter().filter(|h| !h.url.is_empty()).take(PAGES_TO_FETCH) {
            // Unreadable pages are skipped, not fatal.
            if let Ok(page) = fetch_page(&self.http, &hit.url).await {
                findings.push_str(&format!("\n## {}\n{}\n", page.title, page.text));
            }
        }

        let prompt = format!(
            "{}\n\nSearch findings:\n{}\n\nTrend snapshot: {}",
            prompts::research_task(topic, platforms),
            findings,
            trend_snapshot(topic),
        );

        self.gate.acquire().await;
        let response = client
            .complete(
                CompletionRequest::prompt(prompts::RESEARCH_SYSTEM, prompt)
                    .with_temperature(self.config.temperature),
            )
            .await?;

        let mut sources = extract_sources(&response.content, self.max_sources);
        if sources.is_empty() {
            sources = hits
                .iter()
                .map(|h| h.url.clone())
                .filter(|u| !u.is_empty())
                .take(self.max_sources)
                .collect();
        }

        Ok(ResearchData {
            research_brief: response.content,
            sources,
        })
    }
}

#[async_trait]
impl ResearchPhase for ResearchAgent {
    async fn run(
        &self,
        topic: String,
        platforms: Vec<Platform>,
    ) -> Result<AgentOutcome<ResearchData>> {
        Ok(self.execute_research(&topic, &platforms).await)
    }
}

/// Pull cited URLs out of brief text, deduplicated in order.
pub(crate) fn extract_sources(text: &str, cap: usize) -> Vec<String> {
    static URL_RE: OnceLock<regex::Regex> = OnceLock::new();
    let url_re =
        URL_RE.get_or_init(|| regex::Regex::new(r#"https?://[^\s<>"')\]},]+"#).unwrap());

    let mut sources = Vec::new();
    for m in url_re.find_iter(text) {
        let url = m.as_str().trim_end_matches(['.', ',']).to_string();
        if !sources.contains(&url) {
            sources.push(url);
        }
        if sources.len() >= cap {
            break;
        }
    }
    sources
}

/// Mock trend line until a real trends integration exists.
pub(crate) fn trend_snapshot(topic: &str) -> String {
    use rand::Rng;
    let growth = rand::thread_rng().gen_range(40..=120);
    format!(
        "'{topic}' is currently showing high interest with {growth}% growth in searches over \
         the past month, peaking in technology and business sectors."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sources_dedupes_and_caps() {
        let text = "See https://example.com/a and https://example.com/b, plus \
                    https://example.com/a again and https://example.com/c.";
        let sources = extract_sources(text, 2);
        assert_eq!(
            sources,
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_extract_sources_strips_trailing_punctuation() {
        let sources = extract_sources("Cited: https://example.com/page.", 10);
        assert_eq!(sources, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_extract_sources_empty_text() {
        assert!(extract_sources("no links here", 10).is_empty());
    }

    #[test]
    fn test_trend_snapshot_names_topic() {
        let line = trend_snapshot("AI tools");
        assert!(line.contains("AI tools"));
        assert!(line.contains("growth"));
    }
}
