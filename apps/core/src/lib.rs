//! Briefsmith core: builds an SEO content brief from a few categorical
//! choices, keeps dependent options consistent, and enriches the brief from
//! a keyword via local linguistic analysis and a web search.

pub mod actors;
pub mod brain;
pub mod brief;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod fs_manager;
pub mod models;
pub mod preflight;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use actors::enricher::KeywordEnricher;
pub use actors::messages::{BriefView, EnrichmentOutcome, EnrichmentSuggestion};
pub use actors::search::{SearchBackend, SerpApiClient};
pub use actors::supervisor::BriefActorHandle;
pub use brain::BrainAnalyzer;
pub use brief::store::BriefStore;
pub use config::AppConfig;
pub use error::AppError;
pub use models::{BestPractice, Brief, ContentType, FieldChange, Topic};
