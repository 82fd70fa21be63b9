use crate::actors::messages::{AppError, LinguisticSummary, OrganicResult};
use async_trait::async_trait;

/// Defines the public interface for a web search provider.
///
/// This trait abstracts the remote search backend, so the enrichment pipeline can run
/// against SerpAPI in production and against in-memory fakes in tests.
#[async_trait]
pub trait SearchProvider: Send + Sync + 'static {
    /// Runs a single query and returns at most `num` organic results.
    async fn search(&self, query: &str, num: usize) -> Result<Vec<OrganicResult>, AppError>;
}

/// Defines the public interface for local text analysis.
///
/// Implementations extract noun phrases and topics from a short string without
/// any network call.
#[async_trait]
pub trait LinguisticAnalyzer: Send + Sync + 'static {
    /// Analyzes `text`. Empty extractions are not an error.
    async fn analyze(&self, text: &str) -> Result<LinguisticSummary, AppError>;
}
