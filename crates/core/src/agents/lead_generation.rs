//! # Lead Generation Agent
//!
//! Identifies influencers, brands, and communities for a topic. The live
//! path asks the LLM for a ranked JSON list; anything else produces the
//! randomized mock leads from [`fallback`].

use crate::agents::outcome::{AgentOutcome, DegradeCause};
use crate::agents::rate::RateGate;
use crate::agents::{extract_json, fallback, prompts, AgentCapabilities, LeadGenPhase};
use crate::llm::CompletionRequest;
use crate::models::ModelConfig;
use crate::platforms::Platform;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// A prospective contact: influencer, creator, brand, or community owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub profile_url: String,
    pub follower_count: u32,
    pub engagement_rate: f64,
    pub relevance_score: f64,
    #[serde(default)]
    pub last_active: String,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub outreach_priority: String,
}

/// Output of the lead generation phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadData {
    pub leads: Vec<Lead>,
    pub total_found: usize,
}

/// A community surfaced as prompt context for the LLM.
#[derive(Debug, Clone, Serialize)]
pub struct Community {
    pub name: String,
    pub platform: &'static str,
    pub members: u32,
    pub activity: &'static str,
}

/// A brand surfaced as prompt context for the LLM.
#[derive(Debug, Clone, Serialize)]
pub struct Brand {
    pub name: String,
    pub industry: String,
    pub size: &'static str,
    pub social_presence: &'static str,
}

pub struct LeadGenerationAgent {
    config: ModelConfig,
    gate: Arc<RateGate>,
}

impl LeadGenerationAgent {
    pub fn new(config: ModelConfig, gate: Arc<RateGate>) -> Self {
        Self { config, gate }
    }

    pub fn capabilities() -> AgentCapabilities {
        AgentCapabilities {
            capabilities: &[
                "Social media profile search",
                "Influencer analysis",
                "Community discovery",
                "Brand identification",
            ],
            tools: &[
                "social_media_search",
                "analyze_influencer",
                "find_communities",
                "identify_brands",
            ],
        }
    }

    /// Generate leads for a topic. Never fails.
    pub async fn execute_lead_generation(
        &self,
        topic: &str,
        platforms: &[Platform],
        max_leads: usize,
    ) -> AgentOutcome<LeadData> {
        if !self.config.is_configured() {
            return AgentOutcome::Degraded {
                data: mock_lead_data(topic, platforms, max_leads),
                cause: DegradeCause::Unconfigured {
                    env_var: self.config.provider.env_var(),
                },
            };
        }

        match self.generate_live(topic, platforms, max_leads).await {
            Ok(data) => AgentOutcome::Real(data),
            Err(e) => {
                tracing::warn!(topic, error = %e, "lead generation fell back to mock leads");
                AgentOutcome::Degraded {
                    data: mock_lead_data(topic, platforms, max_leads),
                    cause: DegradeCause::Failed(e.to_string()),
                }
            }
        }
    }

    async fn generate_live(
        &self,
        topic: &str,
        platforms: &[Platform],
        max_leads: usize,
    ) -> Result<LeadData> {
        let client = self.config.create_client()?;

        let communities = find_communities(topic);
        let brands = identify_brands(topic);
        let prompt = format!(
            "{}\n\nKnown communities:\n{}\n\nKnown brands:\n{}",
            prompts::lead_generation_task(topic, platforms, max_leads),
            serde_json::to_string_pretty(&communities)?,
            serde_json::to_string_pretty(&brands)?,
        );

        self.gate.acquire().await;
        let response = client
            .complete(
                CompletionRequest::prompt(prompts::LEAD_GEN_SYSTEM, prompt)
                    .with_temperature(self.config.temperature),
            )
            .await?;

        // Model output that doesn't parse as leads is replaced wholesale
        // by the generator; partial lists are kept as-is.
        let mut leads: Vec<Lead> = extract_json(&response.content)
            .unwrap_or_else(|| fallback::mock_leads(topic, platforms, max_leads));

        rank_leads(&mut leads);
        leads.truncate(max_leads);
        Ok(LeadData {
            total_found: leads.len(),
            leads,
        })
    }
}

#[async_trait]
impl LeadGenPhase for LeadGenerationAgent {
    async fn run(
        &self,
        topic: String,
        platforms: Vec<Platform>,
        max_leads: usize,
    ) -> Result<AgentOutcome<LeadData>> {
        Ok(self
            .execute_lead_generation(&topic, &platforms, max_leads)
            .await)
    }
}

fn mock_lead_data(topic: &str, platforms: &[Platform], max_leads: usize) -> LeadData {
    let leads = fallback::mock_leads(topic, platforms, max_leads);
    LeadData {
        total_found: leads.len(),
        leads,
    }
}

/// Sort by relevance, best first.
pub(crate) fn rank_leads(leads: &mut [Lead]) {
    leads.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
}

/// Composite quality score from engagement and audience size, in 0.0..=1.0.
pub(crate) fn relevance_score(follower_count: u32, engagement_rate: f64) -> f64 {
    let engagement_score = (engagement_rate * 20.0).min(1.0);
    let follower_score = (follower_count as f64 / 100_000.0).min(1.0);
    ((engagement_score + follower_score) / 2.0 * 100.0).round() / 100.0
}

/// Communities likely to discuss the topic.
pub(crate) fn find_communities(topic: &str) -> Vec<Community> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    vec![
        Community {
            name: format!("r/{}", topic.to_lowercase().replace(' ', "")),
            platform: "Reddit",
            members: rng.gen_range(5_000..50_000),
            activity: "High",
        },
        Community {
            name: format!("{topic} Professionals"),
            platform: "LinkedIn",
            members: rng.gen_range(10_000..100_000),
            activity: "Medium",
        },
        Community {
            name: format!("{topic} Discord"),
            platform: "Discord",
            members: rng.gen_range(1_000..10_000),
            activity: "High",
        },
    ]
}

/// Brands active in the topic area.
pub(crate) fn identify_brands(topic: &str) -> Vec<Brand> {
    vec![
        Brand {
            name: format!("{topic} Solutions Inc"),
            industry: topic.to_string(),
            size: "Medium",
            social_presence: "Active",
        },
        Brand {
            name: format!("Global {topic} Corp"),
            industry: topic.to_string(),
            size: "Large",
            social_presence: "Very Active",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevance_score_formula() {
        // 0.05 engagement -> 1.0 capped; 50k followers -> 0.5
        assert_eq!(relevance_score(50_000, 0.05), 0.75);
        // Both capped at 1.0
        assert_eq!(relevance_score(1_000_000, 0.5), 1.0);
        assert_eq!(relevance_score(0, 0.0), 0.0);
    }

    #[test]
    fn test_rank_leads_descending() {
        let mut leads = fallback::mock_leads("AI", &[Platform::LinkedIn], 10);
        rank_leads(&mut leads);
        for pair in leads.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[test]
    fn test_find_communities_names_topic() {
        let communities = find_communities("Machine Learning");
        assert_eq!(communities[0].name, "r/machinelearning");
        assert!(communities[1].name.contains("Machine Learning"));
    }

    #[test]
    fn test_identify_brands() {
        let brands = identify_brands("Fintech");
        assert_eq!(brands.len(), 2);
        assert!(brands.iter().all(|b| b.name.contains("Fintech")));
    }
}
