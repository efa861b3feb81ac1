//! Agent outcome types.
//!
//! Fallback data is structurally identical to real data, so the variant -
//! not the payload - is the only thing separating an authoritative result
//! from a fabricated one. Callers must not collapse the two.

/// Why an agent fell back to template data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeCause {
    /// The provider's API key is absent. Not a failure: an implicit mode
    /// switch to the template path.
    Unconfigured { env_var: &'static str },
    /// The live path was attempted and failed at runtime.
    Failed(String),
}

impl DegradeCause {
    /// Short machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DegradeCause::Unconfigured { .. } => "unconfigured",
            DegradeCause::Failed(_) => "runtime_failure",
        }
    }

    /// Human-readable explanation for the `error` field.
    pub fn describe(&self) -> String {
        match self {
            DegradeCause::Unconfigured { env_var } => {
                format!("{env_var} is not set; returned template content")
            }
            DegradeCause::Failed(reason) => reason.clone(),
        }
    }
}

/// Result of one agent execution.
#[derive(Debug, Clone)]
pub enum AgentOutcome<T> {
    /// Produced by the live LLM path.
    Real(T),
    /// Fabricated locally after the live path failed or was unconfigured.
    Degraded { data: T, cause: DegradeCause },
}

impl<T> AgentOutcome<T> {
    pub fn is_real(&self) -> bool {
        matches!(self, AgentOutcome::Real(_))
    }

    pub fn data(&self) -> &T {
        match self {
            AgentOutcome::Real(data) => data,
            AgentOutcome::Degraded { data, .. } => data,
        }
    }

    pub fn into_parts(self) -> (T, Option<DegradeCause>) {
        match self {
            AgentOutcome::Real(data) => (data, None),
            AgentOutcome::Degraded { data, cause } => (data, Some(cause)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_outcome() {
        let outcome = AgentOutcome::Real(42);
        assert!(outcome.is_real());
        assert_eq!(*outcome.data(), 42);
        assert_eq!(outcome.into_parts(), (42, None));
    }

    #[test]
    fn test_degraded_outcome_keeps_data_and_cause() {
        let outcome = AgentOutcome::Degraded {
            data: "mock".to_string(),
            cause: DegradeCause::Failed("timeout".to_string()),
        };
        assert!(!outcome.is_real());
        let (data, cause) = outcome.into_parts();
        assert_eq!(data, "mock");
        assert_eq!(cause.unwrap().label(), "runtime_failure");
    }

    #[test]
    fn test_unconfigured_describe_names_env_var() {
        let cause = DegradeCause::Unconfigured {
            env_var: "OPENAI_API_KEY",
        };
        assert!(cause.describe().contains("OPENAI_API_KEY"));
        assert_eq!(cause.label(), "unconfigured");
    }
}
