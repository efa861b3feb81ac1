//! # Outreach Agent
//!
//! Turns qualified leads into personalized outreach messages. Caps at the
//! first five leads per run.

use crate::agents::lead_generation::Lead;
use crate::agents::outcome::{AgentOutcome, DegradeCause};
use crate::agents::rate::RateGate;
use crate::agents::{extract_json, fallback, prompts, AgentCapabilities, OutreachPhase};
use crate::llm::CompletionRequest;
use crate::models::ModelConfig;
use crate::platforms::Platform;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub(crate) const MAX_MESSAGES_PER_RUN: usize = 5;

/// A personalized message bundle for one lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachMessage {
    pub lead_id: String,
    pub recipient_name: String,
    pub platform: Platform,
    pub subject_line: String,
    pub message_body: String,
    pub follow_up_template: String,
    pub estimated_response_rate: f64,
    pub best_send_time: String,
    pub personalization_score: f64,
    #[serde(default)]
    pub platform_specific_notes: String,
}

/// Output of the outreach phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutreachData {
    pub messages: Vec<OutreachMessage>,
    pub total_messages: usize,
}

pub struct OutreachAgent {
    config: ModelConfig,
    gate: Arc<RateGate>,
}

impl OutreachAgent {
    pub fn new(config: ModelConfig, gate: Arc<RateGate>) -> Self {
        Self { config, gate }
    }

    pub fn capabilities() -> AgentCapabilities {
        AgentCapabilities {
            capabilities: &[
                "Personalized message creation",
                "Template generation",
                "Tone matching",
                "Value proposition creation",
            ],
            tools: &[
                "personalize_message",
                "generate_template",
                "match_tone",
                "create_value_proposition",
            ],
        }
    }

    /// Generate outreach messages for the given leads. Never fails.
    pub async fn execute_outreach(
        &self,
        topic: &str,
        tone: &str,
        leads: &[Lead],
        outreach_type: &str,
    ) -> AgentOutcome<OutreachData> {
        if !self.config.is_configured() {
            return AgentOutcome::Degraded {
                data: mock_outreach_data(topic, tone, leads, outreach_type),
                cause: DegradeCause::Unconfigured {
                    env_var: self.config.provider.env_var(),
                },
            };
        }

        match self.outreach_live(topic, tone, leads, outreach_type).await {
            Ok(data) => AgentOutcome::Real(data),
            Err(e) => {
                tracing::warn!(topic, error = %e, "outreach fell back to template messages");
                AgentOutcome::Degraded {
                    data: mock_outreach_data(topic, tone, leads, outreach_type),
                    cause: DegradeCause::Failed(e.to_string()),
                }
            }
        }
    }

    async fn outreach_live(
        &self,
        topic: &str,
        tone: &str,
        leads: &[Lead],
        outreach_type: &str,
    ) -> Result<OutreachData> {
        let client = self.config.create_client()?;

        let batch = &leads[..leads.len().min(MAX_MESSAGES_PER_RUN)];
        let leads_json = serde_json::to_string_pretty(batch)?;
        let prompt = format!(
            "{}\n\nValue proposition to lean on: {}",
            prompts::outreach_task(topic, tone, outreach_type, &leads_json),
            value_proposition(outreach_type),
        );

        self.gate.acquire().await;
        let response = client
            .complete(
                CompletionRequest::prompt(prompts::OUTREACH_SYSTEM, prompt)
                    .with_temperature(self.config.temperature),
            )
            .await?;

        let mut messages: Vec<OutreachMessage> = extract_json(&response.content)
            .unwrap_or_else(|| fallback::mock_outreach(topic, tone, leads, outreach_type));
        messages.truncate(MAX_MESSAGES_PER_RUN);

        Ok(OutreachData {
            total_messages: messages.len(),
            messages,
        })
    }
}

#[async_trait]
impl OutreachPhase for OutreachAgent {
    async fn run(
        &self,
        topic: String,
        tone: String,
        leads: Vec<Lead>,
        outreach_type: String,
    ) -> Result<AgentOutcome<OutreachData>> {
        Ok(self
            .execute_outreach(&topic, &tone, &leads, &outreach_type)
            .await)
    }
}

fn mock_outreach_data(
    topic: &str,
    tone: &str,
    leads: &[Lead],
    outreach_type: &str,
) -> OutreachData {
    let messages = fallback::mock_outreach(topic, tone, leads, outreach_type);
    OutreachData {
        total_messages: messages.len(),
        messages,
    }
}

/// Core value proposition for each outreach scenario.
pub(crate) fn value_proposition(outreach_type: &str) -> &'static str {
    match outreach_type {
        "collaboration" => "Mutual audience growth, shared expertise, and content amplification",
        "guest_post" => "High-quality content for your audience, fresh perspective, and cross-promotion",
        "partnership" => "Strategic alliance, resource sharing, and expanded market reach",
        "interview" | "interview_request" => {
            "Thought leadership positioning, audience expansion, and content creation"
        }
        _ => "Mutual benefit and authentic value creation",
    }
}

/// Tone guidance matched to the recipient's platform.
pub(crate) fn tone_guideline(platform: Platform) -> &'static str {
    match platform {
        Platform::LinkedIn => "Formal but warm, focus on business value and mutual benefit",
        Platform::Instagram => "Warm and authentic, visual-friendly language",
        Platform::YouTube => "Enthusiastic yet professional, acknowledge their content format",
        Platform::Twitter => "Concise and direct, respect the platform's brevity",
        Platform::Newsletter | Platform::Blog => {
            "Thoughtful and editorial, reference their written work"
        }
    }
}

/// Social proof phrasing based on audience size.
pub(crate) fn social_proof(follower_count: u32) -> String {
    if follower_count > 1_000 {
        format!("your {follower_count} followers")
    } else {
        "your engaged community".to_string()
    }
}

/// Recommended send window per platform.
pub(crate) fn best_send_time(platform: Platform) -> &'static str {
    match platform {
        Platform::LinkedIn => "Tuesday-Thursday, 8-10 AM",
        Platform::Twitter => "Weekdays, 12-3 PM",
        Platform::Instagram => "Monday-Friday, 11 AM-1 PM",
        Platform::YouTube => "Thursday-Saturday, 2-4 PM",
        Platform::Newsletter => "Tuesday or Thursday, 6-9 AM",
        Platform::Blog => "Monday-Wednesday, 7-9 AM",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_proposition_known_types() {
        assert!(value_proposition("collaboration").contains("audience growth"));
        assert!(value_proposition("interview").contains("Thought leadership"));
        assert!(value_proposition("unknown-kind").contains("Mutual benefit"));
    }

    #[test]
    fn test_social_proof_thresholds() {
        assert_eq!(social_proof(500), "your engaged community");
        assert!(social_proof(25_000).contains("25000 followers"));
    }

    #[test]
    fn test_tone_guideline_covers_all_platforms() {
        for platform in Platform::all() {
            assert!(!tone_guideline(platform).is_empty());
        }
    }
}
