//! Content Studio Server
//!
//! Axum server exposing the content creation crew over a JSON API, plus a
//! CLI mode for one-shot workflow runs. The crew is constructed once at
//! startup and injected into the request handlers through shared state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
    routing::{get, post},
    Router,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{convert::Infallible, net::SocketAddr, sync::Arc};
use studio_core::agents::{Lead, OutreachMessage};
use studio_core::models::LlmProvider;
use studio_core::platforms::{tone_catalog, Platform};
use studio_core::settings::Settings;
use studio_core::workflow::{
    ContentCrew, ContentOptions, CrewConfig, CrewEvent, PhaseReport, WorkflowRequest,
    WorkflowResult,
};
use tokio::{
    net::TcpListener,
    sync::{broadcast, mpsc},
};
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};

/// Application state
struct AppState {
    crew: Arc<ContentCrew>,
    event_tx: broadcast::Sender<CrewEvent>,
    settings: Settings,
}

type SharedState = Arc<AppState>;

fn default_tone() -> String {
    "professional".to_string()
}

fn default_content_length() -> String {
    "medium".to_string()
}

fn default_true() -> bool {
    true
}

// === API Types ===

#[derive(Deserialize, ToSchema)]
struct GenerateContentRequest {
    topic: String,
    #[serde(default = "default_tone")]
    tone: String,
    platforms: Vec<String>,
    #[serde(default = "default_content_length")]
    content_length: String,
    #[serde(default = "default_true")]
    research_mode: bool,
    #[serde(default)]
    lead_gen_mode: bool,
    #[serde(default)]
    outreach_mode: bool,
    #[serde(default)]
    target_audience: Option<String>,
    #[serde(default = "default_true")]
    include_hashtags: bool,
    #[serde(default = "default_true")]
    include_cta: bool,
    #[serde(default = "default_true")]
    include_sources: bool,
    #[serde(default)]
    custom_instructions: Option<String>,
}

/// Per-phase outcome summary surfaced to callers.
#[derive(Serialize, ToSchema)]
struct PhaseStatus {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// "unconfigured" or "runtime_failure" when data was fabricated
    #[serde(skip_serializing_if = "Option::is_none")]
    degraded: Option<String>,
}

impl PhaseStatus {
    fn from_report<T>(report: &PhaseReport<T>) -> Self {
        Self {
            success: report.success,
            error: report.error.clone(),
            degraded: report.degraded.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
struct GenerateContentResponse {
    request_id: String,
    status: String,
    success: bool,
    topic: String,
    platforms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    research_brief: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    leads: Option<Vec<Lead>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<BTreeMap<String, String>>,
    #[schema(value_type = Option<Vec<Object>>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    outreach_messages: Option<Vec<OutreachMessage>>,
    sources: Vec<String>,
    workflow_steps: Vec<String>,
    /// Success, error, and degradation marker for each executed phase
    #[schema(value_type = Object)]
    phases: BTreeMap<String, PhaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    created_at: String,
}

impl GenerateContentResponse {
    fn from_result(result: WorkflowResult) -> Self {
        let mut phases = BTreeMap::new();
        if let Some(report) = &result.research {
            phases.insert("research".to_string(), PhaseStatus::from_report(report));
        }
        if let Some(report) = &result.leads {
            phases.insert(
                "lead_generation".to_string(),
                PhaseStatus::from_report(report),
            );
        }
        if let Some(report) = &result.content {
            phases.insert(
                "content_creation".to_string(),
                PhaseStatus::from_report(report),
            );
        }
        if let Some(report) = &result.outreach {
            phases.insert("outreach".to_string(), PhaseStatus::from_report(report));
        }

        Self {
            request_id: result.request_id,
            status: if result.success { "completed" } else { "failed" }.to_string(),
            success: result.success,
            topic: result.topic,
            platforms: result
                .platforms
                .iter()
                .map(|p| p.display_name().to_string())
                .collect(),
            research_brief: result
                .research
                .as_ref()
                .map(|r| r.data.research_brief.clone()),
            sources: result
                .research
                .as_ref()
                .map(|r| r.data.sources.clone())
                .unwrap_or_default(),
            leads: result.leads.map(|r| r.data.leads),
            content: result.content.map(|r| r.data.content),
            outreach_messages: result.outreach.map(|r| r.data.messages),
            workflow_steps: result
                .workflow_steps
                .iter()
                .map(|s| s.label().to_string())
                .collect(),
            phases,
            total_duration: Some(result.total_duration),
            error: result.error,
            created_at: result.started_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
struct ResearchOnlyRequest {
    topic: String,
    #[serde(default)]
    platforms: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
struct ContentOnlyRequest {
    topic: String,
    #[serde(default = "default_tone")]
    tone: String,
    platforms: Vec<String>,
    #[serde(default)]
    research_brief: Option<String>,
    #[serde(default = "default_content_length")]
    content_length: String,
    #[serde(default)]
    target_audience: Option<String>,
    #[serde(default = "default_true")]
    include_hashtags: bool,
    #[serde(default = "default_true")]
    include_cta: bool,
    #[serde(default)]
    custom_instructions: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    agents: String,
    agent_capabilities: usize,
    providers_configured: bool,
}

#[derive(Serialize, ToSchema)]
struct PlatformInfo {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    max_length: usize,
    style: String,
    format: String,
    hashtag_min: u8,
    hashtag_max: u8,
}

#[derive(Serialize, ToSchema)]
struct PlatformsResponse {
    platforms: Vec<PlatformInfo>,
}

#[derive(Serialize, ToSchema)]
struct ToneItem {
    name: String,
    description: String,
    best_for: Vec<String>,
}

#[derive(Serialize, ToSchema)]
struct TonesResponse {
    tones: Vec<ToneItem>,
}

#[derive(Serialize, ToSchema)]
struct ProviderInfo {
    id: String,
    name: String,
    default_model: String,
    env_var: String,
    configured: bool,
}

#[derive(Serialize, ToSchema)]
struct ProvidersResponse {
    providers: Vec<ProviderInfo>,
}

#[derive(Serialize, ToSchema)]
struct CapabilitiesResponse {
    #[schema(value_type = Object)]
    agents: serde_json::Value,
    total_agents: usize,
    total_tools: usize,
    status: String,
}

// === OpenAPI Definition ===

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Content Studio API",
        version = "0.1.0",
        description = "AI-powered content creation and lead generation platform"
    ),
    paths(
        health_check,
        generate_content,
        research_only,
        content_only,
        workflow_status,
        agent_capabilities,
        supported_platforms,
        supported_tones,
        get_providers
    ),
    components(schemas(
        GenerateContentRequest,
        GenerateContentResponse,
        PhaseStatus,
        ResearchOnlyRequest,
        ContentOnlyRequest,
        ErrorResponse,
        HealthResponse,
        PlatformsResponse,
        PlatformInfo,
        TonesResponse,
        ToneItem,
        ProvidersResponse,
        ProviderInfo,
        CapabilitiesResponse
    )),
    tags(
        (name = "workflow", description = "Content generation workflow"),
        (name = "metadata", description = "Platform, tone, and provider catalogs")
    )
)]
struct ApiDoc;

// === Helpers ===

fn parse_platforms(names: &[String]) -> Result<Vec<Platform>, Vec<String>> {
    let mut platforms = Vec::with_capacity(names.len());
    let mut errors = Vec::new();
    for name in names {
        match name.parse::<Platform>() {
            Ok(platform) => platforms.push(platform),
            Err(e) => errors.push(e),
        }
    }
    if errors.is_empty() {
        Ok(platforms)
    } else {
        Err(errors)
    }
}

fn validation_error(detail: &str, errors: Vec<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            detail: detail.to_string(),
            errors,
        }),
    )
}

// === API Handlers ===

/// Root endpoint with API information
async fn root(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": format!("{} API", state.settings.app_name),
        "version": state.settings.version,
        "status": "operational",
        "features": [
            "AI-powered research",
            "Lead generation",
            "Multi-platform content creation",
            "Personalized outreach"
        ],
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Detailed health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "metadata",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    let capabilities = ContentCrew::agent_capabilities();
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.settings.version.clone(),
        agents: "ready".to_string(),
        agent_capabilities: capabilities.len(),
        providers_configured: state.settings.any_provider_configured(),
    })
}

/// Run the complete content creation workflow
#[utoipa::path(
    post,
    path = "/api/v1/generate-content",
    tag = "workflow",
    request_body = GenerateContentRequest,
    responses(
        (status = 200, description = "Workflow result", body = GenerateContentResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn generate_content(
    State(state): State<SharedState>,
    Json(req): Json<GenerateContentRequest>,
) -> Result<Json<GenerateContentResponse>, (StatusCode, Json<ErrorResponse>)> {
    if req.topic.trim().is_empty() {
        return Err(validation_error(
            "Request validation failed",
            vec!["Missing required field: topic".to_string()],
        ));
    }
    if req.platforms.is_empty() {
        return Err(validation_error(
            "Request validation failed",
            vec!["Missing required field: platforms".to_string()],
        ));
    }
    let platforms = parse_platforms(&req.platforms)
        .map_err(|errors| validation_error("Request validation failed", errors))?;

    tracing::info!(topic = %req.topic, "new content generation request");

    let request = WorkflowRequest {
        topic: req.topic,
        tone: req.tone,
        platforms,
        research_mode: req.research_mode,
        lead_gen_mode: req.lead_gen_mode,
        outreach_mode: req.outreach_mode,
        options: ContentOptions {
            content_length: req.content_length,
            target_audience: req.target_audience,
            include_hashtags: req.include_hashtags,
            include_cta: req.include_cta,
            include_sources: req.include_sources,
            custom_instructions: req.custom_instructions,
        },
    };

    let result = state.crew.execute_complete_workflow(request).await;
    tracing::info!(request_id = %result.request_id, "content generation completed");
    Ok(Json(GenerateContentResponse::from_result(result)))
}

/// Run only the research phase
#[utoipa::path(
    post,
    path = "/api/v1/research-only",
    tag = "workflow",
    request_body = ResearchOnlyRequest,
    responses(
        (status = 200, description = "Research result"),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn research_only(
    State(state): State<SharedState>,
    Json(req): Json<ResearchOnlyRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    if req.topic.trim().is_empty() {
        return Err(validation_error(
            "Request validation failed",
            vec!["Missing required field: topic".to_string()],
        ));
    }
    let platforms = parse_platforms(&req.platforms)
        .map_err(|errors| validation_error("Request validation failed", errors))?;

    let result = state
        .crew
        .execute_research_only(&req.topic, &platforms)
        .await;
    Ok(Json(serde_json::to_value(result).unwrap_or_default()))
}

/// Run only the content creation phase
#[utoipa::path(
    post,
    path = "/api/v1/content-only",
    tag = "workflow",
    request_body = ContentOnlyRequest,
    responses(
        (status = 200, description = "Content result"),
        (status = 422, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn content_only(
    State(state): State<SharedState>,
    Json(req): Json<ContentOnlyRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    if req.topic.trim().is_empty() || req.platforms.is_empty() {
        return Err(validation_error(
            "Request validation failed",
            vec!["Fields topic and platforms are required".to_string()],
        ));
    }
    let platforms = parse_platforms(&req.platforms)
        .map_err(|errors| validation_error("Request validation failed", errors))?;

    let options = ContentOptions {
        content_length: req.content_length,
        target_audience: req.target_audience,
        include_hashtags: req.include_hashtags,
        include_cta: req.include_cta,
        include_sources: true,
        custom_instructions: req.custom_instructions,
    };

    let result = state
        .crew
        .execute_content_only(
            &req.topic,
            &req.tone,
            &platforms,
            req.research_brief.as_deref().unwrap_or(""),
            options,
        )
        .await;
    Ok(Json(serde_json::to_value(result).unwrap_or_default()))
}

/// Get the status of a workflow execution
#[utoipa::path(
    get,
    path = "/api/v1/workflow-status/{request_id}",
    tag = "workflow",
    params(("request_id" = String, Path, description = "Workflow request id")),
    responses(
        (status = 200, description = "Workflow status")
    )
)]
async fn workflow_status(
    State(state): State<SharedState>,
    Path(request_id): Path<String>,
) -> Json<serde_json::Value> {
    let status = state.crew.workflow_status(&request_id);
    Json(serde_json::to_value(status).unwrap_or_default())
}

/// Get agent capability metadata
#[utoipa::path(
    get,
    path = "/api/v1/agent-capabilities",
    tag = "metadata",
    responses(
        (status = 200, description = "Agent capabilities", body = CapabilitiesResponse)
    )
)]
async fn agent_capabilities() -> Json<CapabilitiesResponse> {
    let capabilities = ContentCrew::agent_capabilities();
    let total_agents = capabilities.len();
    let total_tools = capabilities.values().map(|c| c.tools.len()).sum();
    Json(CapabilitiesResponse {
        agents: serde_json::to_value(&capabilities).unwrap_or_default(),
        total_agents,
        total_tools,
        status: "ready".to_string(),
    })
}

/// List supported platforms
#[utoipa::path(
    get,
    path = "/api/v1/platforms",
    tag = "metadata",
    responses(
        (status = 200, description = "Supported platforms", body = PlatformsResponse)
    )
)]
async fn supported_platforms() -> Json<PlatformsResponse> {
    let platforms = Platform::all()
        .iter()
        .map(|p| {
            let spec = p.spec();
            PlatformInfo {
                name: p.display_name().to_string(),
                kind: p.kind().to_string(),
                max_length: spec.max_length,
                style: spec.style.to_string(),
                format: spec.format.to_string(),
                hashtag_min: spec.hashtag_min,
                hashtag_max: spec.hashtag_max,
            }
        })
        .collect();
    Json(PlatformsResponse { platforms })
}

/// List supported content tones
#[utoipa::path(
    get,
    path = "/api/v1/tones",
    tag = "metadata",
    responses(
        (status = 200, description = "Supported tones", body = TonesResponse)
    )
)]
async fn supported_tones() -> Json<TonesResponse> {
    let tones = tone_catalog()
        .iter()
        .map(|t| ToneItem {
            name: t.name.to_string(),
            description: t.description.to_string(),
            best_for: t
                .best_for
                .iter()
                .map(|p| p.display_name().to_string())
                .collect(),
        })
        .collect();
    Json(TonesResponse { tones })
}

/// List LLM providers and their configuration state
#[utoipa::path(
    get,
    path = "/api/v1/providers",
    tag = "metadata",
    responses(
        (status = 200, description = "LLM providers", body = ProvidersResponse)
    )
)]
async fn get_providers() -> Json<ProvidersResponse> {
    let providers = LlmProvider::all()
        .into_iter()
        .map(|p| ProviderInfo {
            id: serde_json::to_value(p)
                .ok()
                .and_then(|v| v.as_str().map(String::from))
                .unwrap_or_default(),
            name: p.display_name().to_string(),
            default_model: p.default_model().to_string(),
            env_var: p.env_var().to_string(),
            configured: p.is_configured(),
        })
        .collect();
    Json(ProvidersResponse { providers })
}

/// SSE endpoint for real-time workflow events with heartbeat
async fn events(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_tx.subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        let timeout = tokio::time::timeout(std::time::Duration::from_secs(15), rx.recv()).await;
        match timeout {
            Ok(Ok(event)) => {
                let json = serde_json::to_string(&event).unwrap_or_default();
                Some((Ok(Event::default().data(json)), rx))
            }
            Ok(Err(_)) => None, // Channel closed
            Err(_) => Some((Ok(Event::default().comment("heartbeat")), rx)),
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Serve the OpenAPI document
async fn serve_openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// === Server Entry ===

#[derive(Parser)]
#[command(author, version, about = "Content Studio - AI content creation crew")]
struct Args {
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Start the Content Studio server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
    /// Run a workflow once and print the result as JSON
    Run {
        /// The topic to generate content for
        topic: String,
        /// Content tone
        #[arg(long, default_value = "professional")]
        tone: String,
        /// Target platforms (repeatable)
        #[arg(long = "platform", default_value = "LinkedIn")]
        platforms: Vec<String>,
        /// Skip the research phase
        #[arg(long)]
        no_research: bool,
        /// Include the lead generation phase
        #[arg(long)]
        leads: bool,
        /// Include the outreach phase (requires --leads)
        #[arg(long)]
        outreach: bool,
    },
}

fn build_crew(settings: &Settings) -> (Arc<ContentCrew>, broadcast::Sender<CrewEvent>) {
    let (broadcast_tx, _) = broadcast::channel::<CrewEvent>(100);
    let (event_tx, mut event_rx) = mpsc::channel::<CrewEvent>(100);

    // Bridge crew events onto the broadcast channel for SSE subscribers.
    let bridge_tx = broadcast_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let _ = bridge_tx.send(event);
        }
    });

    let crew = Arc::new(
        ContentCrew::new(CrewConfig::from_settings(settings)).with_event_channel(event_tx),
    );
    (crew, broadcast_tx)
}

async fn run_server(port: u16) -> anyhow::Result<()> {
    let settings = Settings::from_env();
    if !settings.any_provider_configured() {
        tracing::warn!(
            "no LLM API keys configured; all agents will serve template fallback content"
        );
    }

    let (crew, event_tx) = build_crew(&settings);
    let state: SharedState = Arc::new(AppState {
        crew,
        event_tx,
        settings,
    });

    let api_routes = Router::new()
        .route("/generate-content", post(generate_content))
        .route("/research-only", post(research_only))
        .route("/content-only", post(content_only))
        .route("/workflow-status/:request_id", get(workflow_status))
        .route("/agent-capabilities", get(agent_capabilities))
        .route("/platforms", get(supported_platforms))
        .route("/tones", get(supported_tones))
        .route("/providers", get(get_providers))
        .route("/events", get(events))
        .route("/openapi.json", get(serve_openapi));

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Content Studio server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn run_once(
    topic: String,
    tone: String,
    platform_names: Vec<String>,
    no_research: bool,
    leads: bool,
    outreach: bool,
) -> anyhow::Result<()> {
    let platforms = parse_platforms(&platform_names)
        .map_err(|errors| anyhow::anyhow!(errors.join("; ")))?;

    let settings = Settings::from_env();
    let crew = ContentCrew::new(CrewConfig::from_settings(&settings));

    let request = WorkflowRequest::new(topic, platforms)
        .with_tone(tone)
        .with_modes(!no_research, leads, outreach);

    let result = crew.execute_complete_workflow(request).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Some(CliCommand::Run {
            topic,
            tone,
            platforms,
            no_research,
            leads,
            outreach,
        }) => run_once(topic, tone, platforms, no_research, leads, outreach).await,
        Some(CliCommand::Serve { port }) => run_server(port).await,
        None => run_server(8000).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platforms_ok() {
        let platforms = parse_platforms(&["LinkedIn".to_string(), "X (Twitter)".to_string()])
            .unwrap();
        assert_eq!(platforms, vec![Platform::LinkedIn, Platform::Twitter]);
    }

    #[test]
    fn test_parse_platforms_collects_all_errors() {
        let errors =
            parse_platforms(&["MySpace".to_string(), "Friendster".to_string()]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("MySpace"));
    }

    #[test]
    fn test_generate_request_defaults() {
        let req: GenerateContentRequest =
            serde_json::from_str(r#"{"topic": "AI", "platforms": ["LinkedIn"]}"#).unwrap();
        assert!(req.research_mode);
        assert!(!req.lead_gen_mode);
        assert!(!req.outreach_mode);
        assert_eq!(req.tone, "professional");
        assert_eq!(req.content_length, "medium");
        assert!(req.include_hashtags);
    }
}
