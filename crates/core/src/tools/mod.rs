//! # Research Tools
//!
//! Outbound web tooling used by the research agent: keyless web search
//! and page fetching with rough text extraction.

pub mod scrape;
pub mod web_search;

pub use scrape::{fetch_page, PageText};
pub use web_search::{SearchResult, WebSearchTool};
