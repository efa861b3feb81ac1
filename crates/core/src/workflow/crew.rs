//! # Content Creation Crew
//!
//! Runs the four phase agents in a fixed order, threading each phase's
//! output into the next. Every phase is dispatched onto the runtime and
//! await-joined before the next one starts; phases never run concurrently
//! with each other. A phase failure is recorded in that phase's report
//! and does not stop later phases - the complete-workflow entry point
//! always returns a shaped result and never fails.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::agents::{
    AgentCapabilities, AgentOutcome, ContentCreatorAgent, ContentData, ContentPhase, Lead,
    LeadData, LeadGenPhase, LeadGenerationAgent, OutreachAgent, OutreachData, OutreachPhase,
    RateGate, ResearchAgent, ResearchData, ResearchPhase,
};
use crate::models::ModelConfig;
use crate::platforms::Platform;
use crate::settings::Settings;
use crate::workflow::events::{CrewEvent, CrewEventKind};
use crate::workflow::phases::WorkflowPhase;
use crate::workflow::request::{ContentOptions, WorkflowRequest};

/// Configuration for the crew
#[derive(Debug, Clone)]
pub struct CrewConfig {
    /// Crew-wide LLM calls per minute (0 disables the gate)
    pub max_rpm: u32,
    /// Source citation cap for research briefs
    pub max_research_sources: usize,
    /// Lead list cap
    pub max_lead_results: usize,
    /// Outreach scenario used by the complete workflow
    pub default_outreach_type: String,
    /// Per-agent model configuration
    pub research_model: ModelConfig,
    pub lead_gen_model: ModelConfig,
    pub content_model: ModelConfig,
    pub outreach_model: ModelConfig,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            max_rpm: 10,
            max_research_sources: 10,
            max_lead_results: 50,
            default_outreach_type: "collaboration".to_string(),
            // Research and lead scoring run cold; creative phases run hot.
            research_model: ModelConfig::default().with_temperature(0.3),
            lead_gen_model: ModelConfig::default().with_temperature(0.2),
            content_model: ModelConfig::default().with_temperature(0.7),
            outreach_model: ModelConfig::default().with_temperature(0.6),
        }
    }
}

impl CrewConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_rpm: settings.crew_max_rpm,
            max_research_sources: settings.max_research_sources,
            max_lead_results: settings.max_lead_results,
            ..Self::default()
        }
    }
}

/// The serialized face of one phase execution.
///
/// `success` and `error` mirror what the agent reported; `degraded`
/// carries the cause label (`unconfigured` or `runtime_failure`) whenever
/// the data was fabricated rather than produced by the live LLM path.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseReport<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Default> PhaseReport<T> {
    fn from_outcome(outcome: AgentOutcome<T>) -> Self {
        match outcome {
            AgentOutcome::Real(data) => Self {
                success: true,
                error: None,
                degraded: None,
                data,
            },
            AgentOutcome::Degraded { data, cause } => Self {
                success: false,
                error: Some(cause.describe()),
                degraded: Some(cause.label().to_string()),
                data,
            },
        }
    }

    fn from_error(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            degraded: None,
            data: T::default(),
        }
    }
}

/// Aggregated result of a complete workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub request_id: String,
    pub topic: String,
    pub tone: String,
    pub platforms: Vec<Platform>,
    pub started_at: DateTime<Utc>,
    /// Phases actually executed, in order
    pub workflow_steps: Vec<WorkflowPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research: Option<PhaseReport<ResearchData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leads: Option<PhaseReport<LeadData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PhaseReport<ContentData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outreach: Option<PhaseReport<OutreachData>>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub completed_at: DateTime<Utc>,
    pub total_duration: String,
}

/// Result of the research-only entry point.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchOnlyResult {
    pub request_id: String,
    pub success: bool,
    pub research_brief: String,
    pub sources: Vec<String>,
    pub topic: String,
    pub platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of the content-only entry point.
#[derive(Debug, Clone, Serialize)]
pub struct ContentOnlyResult {
    pub request_id: String,
    pub success: bool,
    pub content: BTreeMap<String, String>,
    pub topic: String,
    pub tone: String,
    pub platforms: Vec<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Status record for a workflow execution.
///
/// There is no persistent run registry; every workflow completes within
/// its originating request, so this always reports completion.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowStatus {
    pub request_id: String,
    pub status: String,
    pub progress: u8,
    pub message: String,
}

/// The content creation crew.
///
/// Construct once and share behind an `Arc`; each workflow call builds
/// fresh local state, so concurrent requests need no locking.
pub struct ContentCrew {
    research: Arc<dyn ResearchPhase>,
    lead_gen: Arc<dyn LeadGenPhase>,
    content: Arc<dyn ContentPhase>,
    outreach: Arc<dyn OutreachPhase>,
    max_leads: usize,
    outreach_type: String,
    event_tx: Option<mpsc::Sender<CrewEvent>>,
}

impl ContentCrew {
    /// Build the crew with its real agents.
    pub fn new(config: CrewConfig) -> Self {
        let gate = Arc::new(RateGate::per_minute(config.max_rpm));
        Self {
            research: Arc::new(ResearchAgent::new(
                config.research_model.clone(),
                Arc::clone(&gate),
                config.max_research_sources,
            )),
            lead_gen: Arc::new(LeadGenerationAgent::new(
                config.lead_gen_model.clone(),
                Arc::clone(&gate),
            )),
            content: Arc::new(ContentCreatorAgent::new(
                config.content_model.clone(),
                Arc::clone(&gate),
            )),
            outreach: Arc::new(OutreachAgent::new(config.outreach_model.clone(), gate)),
            max_leads: config.max_lead_results,
            outreach_type: config.default_outreach_type,
            event_tx: None,
        }
    }

    /// Build the crew from injected phase implementations.
    pub fn with_agents(
        research: Arc<dyn ResearchPhase>,
        lead_gen: Arc<dyn LeadGenPhase>,
        content: Arc<dyn ContentPhase>,
        outreach: Arc<dyn OutreachPhase>,
    ) -> Self {
        Self {
            research,
            lead_gen,
            content,
            outreach,
            max_leads: CrewConfig::default().max_lead_results,
            outreach_type: "collaboration".to_string(),
            event_tx: None,
        }
    }

    /// Set event channel for streaming progress
    pub fn with_event_channel(mut self, tx: mpsc::Sender<CrewEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    async fn emit(&self, event: CrewEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Dispatch one phase onto the runtime and await it, downgrading any
    /// task error or panic to a failed report.
    async fn run_phase<T, F>(&self, phase: WorkflowPhase, fut: F) -> PhaseReport<T>
    where
        T: Default + Send + 'static,
        F: Future<Output = Result<AgentOutcome<T>>> + Send + 'static,
    {
        self.emit(CrewEvent::new(CrewEventKind::PhaseStarted).with_phase(phase))
            .await;

        let report = match tokio::spawn(fut).await {
            Ok(Ok(outcome)) => PhaseReport::from_outcome(outcome),
            Ok(Err(e)) => {
                tracing::error!(%phase, error = %e, "phase failed");
                PhaseReport::from_error(e.to_string())
            }
            Err(join_error) => {
                tracing::error!(%phase, error = %join_error, "phase task panicked");
                PhaseReport::from_error(format!("{phase} phase task failed: {join_error}"))
            }
        };

        let event = if let Some(cause) = &report.degraded {
            CrewEvent::new(CrewEventKind::PhaseDegraded)
                .with_phase(phase)
                .with_data(serde_json::json!({ "cause": cause }))
        } else if report.success {
            CrewEvent::new(CrewEventKind::PhaseCompleted).with_phase(phase)
        } else {
            CrewEvent::new(CrewEventKind::PhaseFailed)
                .with_phase(phase)
                .with_data(serde_json::json!({ "error": report.error }))
        };
        self.emit(event).await;

        report
    }

    /// Execute the complete content creation workflow.
    ///
    /// Phase order: research -> lead generation -> content creation ->
    /// outreach, with each optional phase controlled by the request's mode
    /// flags. Content creation always runs. This method has no error
    /// path: every failure is folded into the returned result.
    #[tracing::instrument(skip(self, request), fields(topic = %request.topic))]
    pub async fn execute_complete_workflow(&self, request: WorkflowRequest) -> WorkflowResult {
        let started_at = Utc::now();
        let request_id = request_id("crew", started_at);
        tracing::info!(%request_id, "starting complete workflow");

        self.emit(
            CrewEvent::new(CrewEventKind::WorkflowStarted)
                .with_data(serde_json::json!({ "request_id": request_id })),
        )
        .await;

        let mut workflow_steps = Vec::new();

        // Step 1: Research
        let research_report = if request.research_mode {
            let agent = Arc::clone(&self.research);
            let topic = request.topic.clone();
            let platforms = request.platforms.clone();
            let report = self
                .run_phase(WorkflowPhase::Research, async move {
                    agent.run(topic, platforms).await
                })
                .await;
            workflow_steps.push(WorkflowPhase::Research);
            Some(report)
        } else {
            None
        };

        // Step 2: Lead generation
        let leads_report = if request.lead_gen_mode {
            let agent = Arc::clone(&self.lead_gen);
            let topic = request.topic.clone();
            let platforms = request.platforms.clone();
            let max_leads = self.max_leads;
            let report = self
                .run_phase(WorkflowPhase::LeadGeneration, async move {
                    agent.run(topic, platforms, max_leads).await
                })
                .await;
            workflow_steps.push(WorkflowPhase::LeadGeneration);
            Some(report)
        } else {
            None
        };

        // Step 3: Content creation, always. A failed research phase
        // contributes an empty brief, not its fallback text.
        let research_brief = research_report
            .as_ref()
            .filter(|r| r.success)
            .map(|r| r.data.research_brief.clone())
            .unwrap_or_default();

        let content_report = {
            let agent = Arc::clone(&self.content);
            let topic = request.topic.clone();
            let tone = request.tone.clone();
            let platforms = request.platforms.clone();
            let options = request.options.clone();
            let report = self
                .run_phase(WorkflowPhase::ContentCreation, async move {
                    agent
                        .run(topic, tone, platforms, research_brief, options)
                        .await
                })
                .await;
            workflow_steps.push(WorkflowPhase::ContentCreation);
            report
        };

        // Step 4: Outreach, only when leads were both requested and found.
        let lead_list: Vec<Lead> = leads_report
            .as_ref()
            .map(|r| r.data.leads.clone())
            .unwrap_or_default();

        let outreach_report = if request.outreach_mode && request.lead_gen_mode
            && !lead_list.is_empty()
        {
            let agent = Arc::clone(&self.outreach);
            let topic = request.topic.clone();
            let tone = request.tone.clone();
            let outreach_type = self.outreach_type.clone();
            let report = self
                .run_phase(WorkflowPhase::Outreach, async move {
                    agent.run(topic, tone, lead_list, outreach_type).await
                })
                .await;
            workflow_steps.push(WorkflowPhase::Outreach);
            Some(report)
        } else {
            None
        };

        let completed_at = Utc::now();
        self.emit(
            CrewEvent::new(CrewEventKind::WorkflowCompleted)
                .with_data(serde_json::json!({ "request_id": request_id })),
        )
        .await;
        tracing::info!(%request_id, steps = workflow_steps.len(), "workflow finished");

        WorkflowResult {
            request_id,
            topic: request.topic,
            tone: request.tone,
            platforms: request.platforms,
            started_at,
            workflow_steps,
            research: research_report,
            leads: leads_report,
            content: Some(content_report),
            outreach: outreach_report,
            // True unless something fails outside phase dispatch; phase
            // failures live in the per-phase reports.
            success: true,
            error: None,
            completed_at,
            total_duration: format_duration(completed_at - started_at),
        }
    }

    /// Execute only the research phase.
    pub async fn execute_research_only(
        &self,
        topic: &str,
        platforms: &[Platform],
    ) -> ResearchOnlyResult {
        let created_at = Utc::now();
        let agent = Arc::clone(&self.research);
        let owned_topic = topic.to_string();
        let owned_platforms = platforms.to_vec();

        let report = self
            .run_phase(WorkflowPhase::Research, async move {
                agent.run(owned_topic, owned_platforms).await
            })
            .await;

        ResearchOnlyResult {
            request_id: request_id("research", created_at),
            success: report.success,
            research_brief: report.data.research_brief,
            sources: report.data.sources,
            topic: topic.to_string(),
            platforms: platforms.to_vec(),
            error: report.error,
            degraded: report.degraded,
            created_at,
        }
    }

    /// Execute only the content creation phase.
    pub async fn execute_content_only(
        &self,
        topic: &str,
        tone: &str,
        platforms: &[Platform],
        research_brief: &str,
        options: ContentOptions,
    ) -> ContentOnlyResult {
        let created_at = Utc::now();
        let agent = Arc::clone(&self.content);
        let owned_topic = topic.to_string();
        let owned_tone = tone.to_string();
        let owned_platforms = platforms.to_vec();
        let owned_brief = research_brief.to_string();

        let report = self
            .run_phase(WorkflowPhase::ContentCreation, async move {
                agent
                    .run(owned_topic, owned_tone, owned_platforms, owned_brief, options)
                    .await
            })
            .await;

        ContentOnlyResult {
            request_id: request_id("content", created_at),
            success: report.success,
            content: report.data.content,
            topic: topic.to_string(),
            tone: tone.to_string(),
            platforms: platforms.to_vec(),
            error: report.error,
            degraded: report.degraded,
            created_at,
        }
    }

    /// Status of a workflow execution.
    pub fn workflow_status(&self, request_id: &str) -> WorkflowStatus {
        WorkflowStatus {
            request_id: request_id.to_string(),
            status: "completed".to_string(),
            progress: 100,
            message: "Workflow completed successfully".to_string(),
        }
    }

    /// Static capability metadata for all four agents.
    pub fn agent_capabilities() -> BTreeMap<&'static str, AgentCapabilities> {
        BTreeMap::from([
            ("research_agent", ResearchAgent::capabilities()),
            ("lead_generation_agent", LeadGenerationAgent::capabilities()),
            ("content_creator_agent", ContentCreatorAgent::capabilities()),
            ("outreach_agent", OutreachAgent::capabilities()),
        ])
    }
}

fn request_id(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}", prefix, at.format("%Y%m%d_%H%M%S"))
}

fn format_duration(duration: chrono::Duration) -> String {
    let millis = duration.num_milliseconds().max(0);
    format!("{}.{:03}s", millis / 1000, millis % 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::fallback;
    use crate::agents::outcome::DegradeCause;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Clone, Copy)]
    enum Behavior {
        Real,
        Degraded,
        Fail,
    }

    struct StubResearch(Behavior);

    #[async_trait]
    impl ResearchPhase for StubResearch {
        async fn run(
            &self,
            topic: String,
            _platforms: Vec<Platform>,
        ) -> Result<AgentOutcome<ResearchData>> {
            match self.0 {
                Behavior::Real => Ok(AgentOutcome::Real(ResearchData {
                    research_brief: format!("Brief on {topic}"),
                    sources: vec!["https://example.com".to_string()],
                })),
                Behavior::Degraded => Ok(AgentOutcome::Degraded {
                    data: ResearchData {
                        research_brief: "template brief".to_string(),
                        sources: vec![],
                    },
                    cause: DegradeCause::Failed("llm unreachable".to_string()),
                }),
                Behavior::Fail => anyhow::bail!("research exploded"),
            }
        }
    }

    struct StubLeads(usize);

    #[async_trait]
    impl LeadGenPhase for StubLeads {
        async fn run(
            &self,
            topic: String,
            platforms: Vec<Platform>,
            _max_leads: usize,
        ) -> Result<AgentOutcome<LeadData>> {
            let leads = fallback::mock_leads(&topic, &platforms, self.0);
            Ok(AgentOutcome::Real(LeadData {
                total_found: leads.len(),
                leads,
            }))
        }
    }

    struct StubContent {
        behavior: Behavior,
        seen_brief: Mutex<Option<String>>,
    }

    impl StubContent {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                seen_brief: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ContentPhase for StubContent {
        async fn run(
            &self,
            _topic: String,
            _tone: String,
            platforms: Vec<Platform>,
            research_brief: String,
            _options: ContentOptions,
        ) -> Result<AgentOutcome<ContentData>> {
            *self.seen_brief.lock().unwrap() = Some(research_brief);
            match self.behavior {
                Behavior::Fail => anyhow::bail!("content exploded"),
                _ => {
                    let content = platforms
                        .iter()
                        .map(|p| (p.display_name().to_string(), format!("post for {p}")))
                        .collect();
                    Ok(AgentOutcome::Real(ContentData { content }))
                }
            }
        }
    }

    struct StubOutreach;

    #[async_trait]
    impl OutreachPhase for StubOutreach {
        async fn run(
            &self,
            topic: String,
            tone: String,
            leads: Vec<Lead>,
            outreach_type: String,
        ) -> Result<AgentOutcome<OutreachData>> {
            let messages = fallback::mock_outreach(&topic, &tone, &leads, &outreach_type);
            Ok(AgentOutcome::Real(OutreachData {
                total_messages: messages.len(),
                messages,
            }))
        }
    }

    struct TestCrew {
        crew: ContentCrew,
        content: Arc<StubContent>,
    }

    fn crew_with(research: Behavior, lead_count: usize, content: Behavior) -> TestCrew {
        let content_stub = Arc::new(StubContent::new(content));
        let crew = ContentCrew::with_agents(
            Arc::new(StubResearch(research)),
            Arc::new(StubLeads(lead_count)),
            Arc::clone(&content_stub) as Arc<dyn ContentPhase>,
            Arc::new(StubOutreach),
        );
        TestCrew {
            crew,
            content: content_stub,
        }
    }

    fn request(research: bool, lead_gen: bool, outreach: bool) -> WorkflowRequest {
        WorkflowRequest::new("AI tools", vec![Platform::LinkedIn])
            .with_modes(research, lead_gen, outreach)
    }

    #[tokio::test]
    async fn test_content_only_steps() {
        let t = crew_with(Behavior::Real, 3, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(false, false, false)).await;

        assert_eq!(result.workflow_steps, vec![WorkflowPhase::ContentCreation]);
        assert!(result.research.is_none());
        assert!(result.leads.is_none());
        assert!(result.outreach.is_none());
        assert!(result.content.is_some());
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_research_failure_still_runs_content_with_empty_brief() {
        let t = crew_with(Behavior::Fail, 0, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(true, false, false)).await;

        let research = result.research.unwrap();
        assert!(!research.success);
        assert!(research.error.unwrap().contains("research exploded"));
        assert!(research.data.research_brief.is_empty());

        let content = result.content.unwrap();
        assert!(content.success);
        assert_eq!(t.content.seen_brief.lock().unwrap().as_deref(), Some(""));
        assert_eq!(
            result.workflow_steps,
            vec![WorkflowPhase::Research, WorkflowPhase::ContentCreation]
        );
    }

    #[tokio::test]
    async fn test_degraded_research_brief_is_not_forwarded() {
        let t = crew_with(Behavior::Degraded, 0, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(true, false, false)).await;

        let research = result.research.unwrap();
        assert!(!research.success);
        assert_eq!(research.degraded.as_deref(), Some("runtime_failure"));
        // Fallback brief data is present on the report but not treated as
        // authoritative context for content creation.
        assert_eq!(research.data.research_brief, "template brief");
        assert_eq!(t.content.seen_brief.lock().unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_real_research_brief_is_forwarded() {
        let t = crew_with(Behavior::Real, 0, Behavior::Real);
        let _ = t.crew.execute_complete_workflow(request(true, false, false)).await;
        assert_eq!(
            t.content.seen_brief.lock().unwrap().as_deref(),
            Some("Brief on AI tools")
        );
    }

    #[tokio::test]
    async fn test_spec_example_research_plus_content() {
        let t = crew_with(Behavior::Real, 0, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(true, false, false)).await;

        assert_eq!(
            result.workflow_steps,
            vec![WorkflowPhase::Research, WorkflowPhase::ContentCreation]
        );
        let content = result.content.unwrap();
        assert!(content.data.content.contains_key("LinkedIn"));
    }

    #[tokio::test]
    async fn test_outreach_runs_when_leads_found() {
        let t = crew_with(Behavior::Real, 3, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(false, true, true)).await;

        assert_eq!(
            result.workflow_steps,
            vec![
                WorkflowPhase::LeadGeneration,
                WorkflowPhase::ContentCreation,
                WorkflowPhase::Outreach
            ]
        );
        let outreach = result.outreach.unwrap();
        assert_eq!(outreach.data.total_messages, 3);
    }

    #[tokio::test]
    async fn test_outreach_skipped_without_leads() {
        let t = crew_with(Behavior::Real, 0, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(false, true, true)).await;

        assert!(result.outreach.is_none());
        assert!(!result.workflow_steps.contains(&WorkflowPhase::Outreach));
    }

    #[tokio::test]
    async fn test_outreach_requires_lead_gen_mode() {
        let t = crew_with(Behavior::Real, 3, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(false, false, true)).await;

        assert!(result.leads.is_none());
        assert!(result.outreach.is_none());
        assert_eq!(result.workflow_steps, vec![WorkflowPhase::ContentCreation]);
    }

    #[tokio::test]
    async fn test_content_failure_keeps_top_level_success() {
        let t = crew_with(Behavior::Real, 0, Behavior::Fail);
        let result = t.crew.execute_complete_workflow(request(false, false, false)).await;

        let content = result.content.unwrap();
        assert!(!content.success);
        assert!(content.data.content.is_empty());
        assert!(content.error.unwrap().contains("content exploded"));
        assert!(result.success);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_workflow_steps_serialize_snake_case() {
        let t = crew_with(Behavior::Real, 0, Behavior::Real);
        let result = t.crew.execute_complete_workflow(request(true, false, false)).await;

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json["workflow_steps"],
            serde_json::json!(["research", "content_creation"])
        );
        assert!(json["request_id"].as_str().unwrap().starts_with("crew_"));
        assert!(json["total_duration"].as_str().unwrap().ends_with('s'));
    }

    #[tokio::test]
    async fn test_events_emitted_in_order() {
        let (tx, mut rx) = mpsc::channel(64);
        let content_stub = Arc::new(StubContent::new(Behavior::Real));
        let crew = ContentCrew::with_agents(
            Arc::new(StubResearch(Behavior::Real)),
            Arc::new(StubLeads(0)),
            content_stub as Arc<dyn ContentPhase>,
            Arc::new(StubOutreach),
        )
        .with_event_channel(tx);

        let _ = crew.execute_complete_workflow(request(true, false, false)).await;

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.kind);
        }
        assert_eq!(
            kinds,
            vec![
                CrewEventKind::WorkflowStarted,
                CrewEventKind::PhaseStarted,
                CrewEventKind::PhaseCompleted,
                CrewEventKind::PhaseStarted,
                CrewEventKind::PhaseCompleted,
                CrewEventKind::WorkflowCompleted,
            ]
        );
    }

    #[tokio::test]
    async fn test_research_only_reports_phase_success() {
        let t = crew_with(Behavior::Real, 0, Behavior::Real);
        let result = t
            .crew
            .execute_research_only("AI tools", &[Platform::Blog])
            .await;

        assert!(result.success);
        assert!(result.request_id.starts_with("research_"));
        assert_eq!(result.research_brief, "Brief on AI tools");
    }

    #[tokio::test]
    async fn test_content_only_result_shape() {
        let t = crew_with(Behavior::Real, 0, Behavior::Real);
        let result = t
            .crew
            .execute_content_only(
                "AI tools",
                "casual",
                &[Platform::LinkedIn],
                "",
                ContentOptions::default(),
            )
            .await;

        assert!(result.success);
        assert!(result.request_id.starts_with("content_"));
        assert!(result.content.contains_key("LinkedIn"));
    }

    #[test]
    fn test_workflow_status_is_static() {
        let t = crew_with(Behavior::Real, 0, Behavior::Real);
        let status = t.crew.workflow_status("crew_20240115_120000");
        assert_eq!(status.status, "completed");
        assert_eq!(status.progress, 100);
    }

    #[test]
    fn test_agent_capabilities_cover_all_agents() {
        let capabilities = ContentCrew::agent_capabilities();
        assert_eq!(capabilities.len(), 4);
        assert!(capabilities.contains_key("research_agent"));
        assert!(capabilities.contains_key("outreach_agent"));
        let research = capabilities["research_agent"];
        assert!(research.tools.contains(&"web_search"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::milliseconds(5_123)), "5.123s");
        assert_eq!(format_duration(chrono::Duration::milliseconds(42)), "0.042s");
    }
}
