//! Keyword enrichment pipeline.
//!
//! 1. Linguistic extraction over the keyword (noun phrases, topics).
//! 2. One remote search for the keyword.
//! 3-5. Title, description and outline synthesis from both.
//!
//! The pipeline never touches the brief. Any failure aborts the whole run, so
//! the caller either merges a complete suggestion or nothing.

use crate::actors::messages::{AppError, EnrichmentSuggestion, LinguisticSummary, OrganicResult};
use crate::actors::traits::{LinguisticAnalyzer, SearchProvider};
use std::sync::Arc;
use tracing::{info, instrument};

/// Maximum number of characters kept from the joined snippets.
pub const DESCRIPTION_MAX_CHARS: usize = 200;
/// Appended to every synthesized description.
pub const DESCRIPTION_SOURCE_SUFFIX: &str = " (Summarized from top search results)";
/// Last line of every synthesized outline.
pub const OUTLINE_CLOSING_LINE: &str = "Conclusion: Next Steps and Future Trends";
/// Default number of organic results requested.
pub const DEFAULT_RESULT_COUNT: usize = 5;

/// Runs the enrichment pipeline against injected providers.
pub struct KeywordEnricher<S, L>
where
    S: SearchProvider,
    L: LinguisticAnalyzer,
{
    search: Arc<S>,
    analyzer: Arc<L>,
    result_count: usize,
}

impl<S, L> KeywordEnricher<S, L>
where
    S: SearchProvider,
    L: LinguisticAnalyzer,
{
    pub fn new(search: Arc<S>, analyzer: Arc<L>) -> Self {
        Self::with_result_count(search, analyzer, DEFAULT_RESULT_COUNT)
    }

    pub fn with_result_count(search: Arc<S>, analyzer: Arc<L>, result_count: usize) -> Self {
        Self {
            search,
            analyzer,
            result_count,
        }
    }

    /// Produces title, description and outline suggestions for `keyword`.
    #[instrument(skip(self))]
    pub async fn enrich(&self, keyword: &str) -> Result<EnrichmentSuggestion, AppError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(AppError::Validation("keyword is empty".to_string()));
        }

        let summary = self.analyzer.analyze(keyword).await?;
        let results = self.search.search(keyword, self.result_count).await?;
        info!(
            results = results.len(),
            nouns = summary.nouns.len(),
            topics = summary.topics.len(),
            "Collected enrichment inputs"
        );

        Ok(EnrichmentSuggestion {
            title: synthesize_title(keyword, &results),
            description: synthesize_description(&results),
            outline: synthesize_outline(keyword, &summary, &results),
        })
    }
}

/// Title built from the keyword and the first word of the top result.
pub fn synthesize_title(keyword: &str, results: &[OrganicResult]) -> String {
    match results.first() {
        Some(top) => {
            let first_word = top.title.split_whitespace().next().unwrap_or_default();
            format!(
                "Ultimate Guide to {} in 2025: Insights from {}",
                keyword, first_word
            )
        }
        None => format!("Comprehensive Overview of {}", keyword),
    }
}

/// Snippets joined by single spaces, cut to `DESCRIPTION_MAX_CHARS`, plus the source suffix.
pub fn synthesize_description(results: &[OrganicResult]) -> String {
    let joined = results
        .iter()
        .map(|r| r.snippet.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let mut description: String = joined.chars().take(DESCRIPTION_MAX_CHARS).collect();
    description.push_str(DESCRIPTION_SOURCE_SUFFIX);
    description
}

/// Intro, concepts, strategies, one line per result, closing line.
pub fn synthesize_outline(
    keyword: &str,
    summary: &LinguisticSummary,
    results: &[OrganicResult],
) -> String {
    let mut lines = Vec::with_capacity(results.len() + 4);
    lines.push(format!("Introduction: Understanding {}", keyword));
    lines.push(format!("Key Concepts: {}", summary.nouns_summary()));
    lines.push(format!("Strategies: {}", summary.topics_summary()));
    lines.extend(results.iter().map(|r| title_head(&r.title).to_string()));
    lines.push(OUTLINE_CLOSING_LINE.to_string());
    lines.join("\n")
}

/// The part of a result title before its first colon.
fn title_head(title: &str) -> &str {
    title.split(':').next().unwrap_or(title).trim()
}
