//! Workflow request types.

use crate::platforms::Platform;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_tone() -> String {
    "professional".to_string()
}

fn default_content_length() -> String {
    "medium".to_string()
}

/// Free-form content generation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentOptions {
    /// Length of content (short/medium/long)
    #[serde(default = "default_content_length")]
    pub content_length: String,
    /// Target audience description
    #[serde(default)]
    pub target_audience: Option<String>,
    /// Include hashtags in content
    #[serde(default = "default_true")]
    pub include_hashtags: bool,
    /// Include call-to-action
    #[serde(default = "default_true")]
    pub include_cta: bool,
    /// Include source citations
    #[serde(default = "default_true")]
    pub include_sources: bool,
    /// Custom instructions for agents
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            content_length: default_content_length(),
            target_audience: None,
            include_hashtags: true,
            include_cta: true,
            include_sources: true,
            custom_instructions: None,
        }
    }
}

/// A complete workflow request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRequest {
    /// The topic for content generation
    pub topic: String,
    /// Tone of the content
    #[serde(default = "default_tone")]
    pub tone: String,
    /// Target platforms for content
    pub platforms: Vec<Platform>,
    /// Whether to include the research phase
    #[serde(default = "default_true")]
    pub research_mode: bool,
    /// Whether to include lead generation
    #[serde(default)]
    pub lead_gen_mode: bool,
    /// Whether to include outreach generation
    #[serde(default)]
    pub outreach_mode: bool,
    #[serde(flatten)]
    pub options: ContentOptions,
}

impl WorkflowRequest {
    pub fn new(topic: impl Into<String>, platforms: Vec<Platform>) -> Self {
        Self {
            topic: topic.into(),
            tone: default_tone(),
            platforms,
            research_mode: true,
            lead_gen_mode: false,
            outreach_mode: false,
            options: ContentOptions::default(),
        }
    }

    pub fn with_modes(mut self, research: bool, lead_gen: bool, outreach: bool) -> Self {
        self.research_mode = research;
        self.lead_gen_mode = lead_gen;
        self.outreach_mode = outreach;
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Request-shape validation: topic and platforms must be present.
    pub fn validate(&self) -> Result<(), String> {
        if self.topic.trim().is_empty() {
            return Err("Missing required field: topic".to_string());
        }
        if self.platforms.is_empty() {
            return Err("Missing required field: platforms".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_defaults() {
        let request: WorkflowRequest =
            serde_json::from_str(r#"{"topic": "AI tools", "platforms": ["LinkedIn"]}"#).unwrap();
        assert!(request.research_mode);
        assert!(!request.lead_gen_mode);
        assert!(!request.outreach_mode);
        assert_eq!(request.tone, "professional");
        assert_eq!(request.options.content_length, "medium");
        assert!(request.options.include_hashtags);
    }

    #[test]
    fn test_flattened_options_deserialize() {
        let request: WorkflowRequest = serde_json::from_str(
            r#"{
                "topic": "AI tools",
                "platforms": ["LinkedIn", "X (Twitter)"],
                "content_length": "long",
                "target_audience": "developers",
                "include_cta": false
            }"#,
        )
        .unwrap();
        assert_eq!(request.options.content_length, "long");
        assert_eq!(request.options.target_audience.as_deref(), Some("developers"));
        assert!(!request.options.include_cta);
        assert_eq!(request.platforms[1], Platform::Twitter);
    }

    #[test]
    fn test_validate_rejects_empty_topic() {
        let request = WorkflowRequest::new("   ", vec![Platform::Blog]);
        assert!(request.validate().unwrap_err().contains("topic"));
    }

    #[test]
    fn test_validate_rejects_empty_platforms() {
        let request = WorkflowRequest::new("AI", vec![]);
        assert!(request.validate().unwrap_err().contains("platforms"));
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let request = WorkflowRequest::new("AI", vec![Platform::LinkedIn]);
        assert!(request.validate().is_ok());
    }
}
