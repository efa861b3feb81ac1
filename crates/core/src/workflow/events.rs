//! # Crew Events
//!
//! Progress events emitted while a workflow runs. The server bridges
//! these onto its SSE stream.

use crate::workflow::phases::WorkflowPhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of crew event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CrewEventKind {
    /// Workflow started
    WorkflowStarted,
    /// A phase started working
    PhaseStarted,
    /// A phase completed with real data
    PhaseCompleted,
    /// A phase fell back to template data
    PhaseDegraded,
    /// A phase task failed outright
    PhaseFailed,
    /// Workflow finished
    WorkflowCompleted,
}

/// An event in the workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewEvent {
    /// Unique event ID
    pub id: Uuid,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Kind of event
    pub kind: CrewEventKind,
    /// Phase this event belongs to, if any
    #[serde(default)]
    pub phase: Option<WorkflowPhase>,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl CrewEvent {
    /// Create a new event
    pub fn new(kind: CrewEventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            phase: None,
            data: None,
        }
    }

    /// Tag the event with a phase
    pub fn with_phase(mut self, phase: WorkflowPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = CrewEvent::new(CrewEventKind::PhaseStarted)
            .with_phase(WorkflowPhase::Research)
            .with_data(serde_json::json!({ "topic": "AI" }));

        assert_eq!(event.kind, CrewEventKind::PhaseStarted);
        assert_eq!(event.phase, Some(WorkflowPhase::Research));
        assert!(event.data.is_some());
    }

    #[test]
    fn test_event_ids_unique() {
        let a = CrewEvent::new(CrewEventKind::WorkflowStarted);
        let b = CrewEvent::new(CrewEventKind::WorkflowStarted);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&CrewEventKind::PhaseDegraded).unwrap();
        assert_eq!(json, "\"phase_degraded\"");
    }
}
