//! # Studio Agents
//!
//! The four phase agents of the content creation crew.
//!
//! ## Architecture
//!
//! ```text
//! ContentCrew (workflow orchestrator)
//!   └── Phase traits (ResearchPhase, LeadGenPhase, ContentPhase, OutreachPhase)
//!         └── Agents (ModelConfig + a closed set of typed tools)
//! ```
//!
//! Every agent follows the same contract: its `execute_*` operation never
//! fails. The live LLM path is attempted first; any failure - including a
//! missing API key - is downgraded to an [`outcome::AgentOutcome::Degraded`]
//! carrying locally generated template data, so callers always receive
//! well-shaped results and must check the outcome variant to know whether
//! the data is authoritative.

pub mod fallback;
pub mod outcome;
pub mod prompts;
pub mod rate;

pub mod content_creator;
pub mod lead_generation;
pub mod outreach;
pub mod research;

pub use content_creator::{ContentCreatorAgent, ContentData};
pub use lead_generation::{Lead, LeadData, LeadGenerationAgent};
pub use outcome::{AgentOutcome, DegradeCause};
pub use outreach::{OutreachAgent, OutreachData, OutreachMessage};
pub use rate::RateGate;
pub use research::{ResearchAgent, ResearchData};

use crate::platforms::Platform;
use crate::workflow::request::ContentOptions;
use async_trait::async_trait;
use serde::Serialize;

/// Static description of what one agent can do, for the capabilities
/// endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AgentCapabilities {
    pub capabilities: &'static [&'static str],
    pub tools: &'static [&'static str],
}

/// Research phase seam.
#[async_trait]
pub trait ResearchPhase: Send + Sync {
    async fn run(
        &self,
        topic: String,
        platforms: Vec<Platform>,
    ) -> anyhow::Result<AgentOutcome<ResearchData>>;
}

/// Lead generation phase seam.
#[async_trait]
pub trait LeadGenPhase: Send + Sync {
    async fn run(
        &self,
        topic: String,
        platforms: Vec<Platform>,
        max_leads: usize,
    ) -> anyhow::Result<AgentOutcome<LeadData>>;
}

/// Content creation phase seam.
#[async_trait]
pub trait ContentPhase: Send + Sync {
    async fn run(
        &self,
        topic: String,
        tone: String,
        platforms: Vec<Platform>,
        research_brief: String,
        options: ContentOptions,
    ) -> anyhow::Result<AgentOutcome<ContentData>>;
}

/// Outreach phase seam.
#[async_trait]
pub trait OutreachPhase: Send + Sync {
    async fn run(
        &self,
        topic: String,
        tone: String,
        leads: Vec<Lead>,
        outreach_type: String,
    ) -> anyhow::Result<AgentOutcome<OutreachData>>;
}

/// Pull the first JSON value out of LLM response text.
///
/// Models wrap JSON in prose or code fences more often than not; this
/// scans for the outermost array/object delimiters and tries to parse
/// what's between them.
pub(crate) fn extract_json<T: serde::de::DeserializeOwned>(text: &str) -> Option<T> {
    for (open, close) in [('[', ']'), ('{', '}')] {
        let (Some(start), Some(end)) = (text.find(open), text.rfind(close)) else {
            continue;
        };
        if end > start {
            if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_fenced_response() {
        let text = "Here you go:\n```json\n[1, 2, 3]\n```\nEnjoy!";
        let parsed: Vec<u32> = extract_json(text).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn test_extract_json_object() {
        let text = "Result: {\"LinkedIn\": \"post text\"} done";
        let parsed: std::collections::BTreeMap<String, String> = extract_json(text).unwrap();
        assert_eq!(parsed.get("LinkedIn").unwrap(), "post text");
    }

    #[test]
    fn test_extract_json_rejects_prose() {
        let parsed: Option<Vec<u32>> = extract_json("no json here at all");
        assert!(parsed.is_none());
    }
}
