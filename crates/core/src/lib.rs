//! # Studio Core
//!
//! The engine room of Content Studio - agent implementations, workflow
//! orchestration, LLM provider clients, and the platform catalog.
//!
//! ## Architecture
//!
//! - `agents/` - The four phase agents (Research, LeadGeneration, ContentCreator, Outreach)
//! - `llm/` - Provider-agnostic chat completion clients (OpenAI, Anthropic, OpenRouter)
//! - `models/` - Centralized LLM provider configuration
//! - `platforms/` - Target platform and tone catalog
//! - `tools/` - Web search and page extraction used by the research agent
//! - `workflow/` - The sequential content creation crew
//!
//! ## Usage
//!
//! ```rust,ignore
//! use studio_core::workflow::{ContentCrew, CrewConfig, WorkflowRequest};
//!
//! let crew = ContentCrew::new(CrewConfig::default());
//! let result = crew.execute_complete_workflow(request).await;
//! ```

pub mod agents;
pub mod llm;
pub mod models;
pub mod platforms;
pub mod settings;
pub mod tools;
pub mod workflow;
