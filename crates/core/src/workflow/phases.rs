//! Workflow phase names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of the fixed workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Research,
    LeadGeneration,
    ContentCreation,
    Outreach,
}

impl WorkflowPhase {
    pub fn all() -> [WorkflowPhase; 4] {
        [
            WorkflowPhase::Research,
            WorkflowPhase::LeadGeneration,
            WorkflowPhase::ContentCreation,
            WorkflowPhase::Outreach,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkflowPhase::Research => "research",
            WorkflowPhase::LeadGeneration => "lead_generation",
            WorkflowPhase::ContentCreation => "content_creation",
            WorkflowPhase::Outreach => "outreach",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&WorkflowPhase::ContentCreation).unwrap(),
            "\"content_creation\""
        );
        assert_eq!(
            serde_json::to_string(&WorkflowPhase::LeadGeneration).unwrap(),
            "\"lead_generation\""
        );
    }

    #[test]
    fn test_label_matches_serde() {
        for phase in WorkflowPhase::all() {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase.label()));
        }
    }
}
