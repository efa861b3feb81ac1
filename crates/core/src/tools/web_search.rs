//! Web search via the DuckDuckGo instant answer API (no API key required).

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = "content-studio/0.1";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: &'static str,
}

/// Keyless web search client.
pub struct WebSearchTool {
    client: reqwest::Client,
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSearchTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(SEARCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Search the web for a query, returning up to `max_results` hits.
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let url = format!(
            "https://api.duckduckgo.com/?q={}&format=json&no_html=1&skip_disambig=1",
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("search request failed")?;

        let json: serde_json::Value = response
            .json()
            .await
            .context("failed to parse search response")?;

        Ok(parse_duckduckgo(&json, max_results))
    }
}

/// Extract results from a DuckDuckGo instant answer payload.
pub(crate) fn parse_duckduckgo(json: &serde_json::Value, max_results: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    // The abstract, when present, is the best single answer.
    if let Some(abstract_text) = json.get("Abstract").and_then(|a| a.as_str()) {
        if !abstract_text.is_empty() {
            results.push(SearchResult {
                title: json
                    .get("Heading")
                    .and_then(|h| h.as_str())
                    .unwrap_or("DuckDuckGo Summary")
                    .to_string(),
                url: json
                    .get("AbstractURL")
                    .and_then(|u| u.as_str())
                    .unwrap_or_default()
                    .to_string(),
                snippet: abstract_text.to_string(),
                source: "DuckDuckGo",
            });
        }
    }

    if let Some(topics) = json.get("RelatedTopics").and_then(|t| t.as_array()) {
        for topic in topics {
            if results.len() >= max_results {
                break;
            }
            let Some(text) = topic.get("Text").and_then(|t| t.as_str()) else {
                continue;
            };
            let url = topic
                .get("FirstURL")
                .and_then(|u| u.as_str())
                .unwrap_or_default();
            results.push(SearchResult {
                title: url
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .replace('_', " "),
                url: url.to_string(),
                snippet: text.to_string(),
                source: "DuckDuckGo",
            });
        }
    }

    results.truncate(max_results);
    results
}
