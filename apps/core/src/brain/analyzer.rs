//! Brain Analyzer - local linguistic analysis for keyword enrichment.
//!
//! Combines noun-phrase chunking and TF-IDF topic extraction. Runs entirely in
//! process; no network call is made.

use async_trait::async_trait;
use tracing::debug;

use super::keywords::KeywordExtractor;
use super::noun_phrases::NounPhraseExtractor;
use crate::actors::messages::{AppError, LinguisticSummary};
use crate::actors::traits::LinguisticAnalyzer;

/// Number of topics kept per analysis.
const MAX_TOPICS: usize = 5;

/// Main Brain analyzer that orchestrates the extraction components
pub struct BrainAnalyzer {
    noun_phrases: NounPhraseExtractor,
    keyword_extractor: KeywordExtractor,
}

impl Default for BrainAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BrainAnalyzer {
    /// Create a new Brain analyzer with default settings
    pub fn new() -> Self {
        Self {
            noun_phrases: NounPhraseExtractor::default(),
            keyword_extractor: KeywordExtractor::new(),
        }
    }

    /// Synchronous analysis, shared by the trait implementation.
    pub fn summarize(&self, text: &str) -> LinguisticSummary {
        let summary = LinguisticSummary {
            nouns: self.noun_phrases.extract(text),
            topics: self.keyword_extractor.extract_keywords(text, Some(MAX_TOPICS)),
        };
        debug!(
            nouns = summary.nouns.len(),
            topics = summary.topics.len(),
            "Analyzed keyword text"
        );
        summary
    }
}

#[async_trait]
impl LinguisticAnalyzer for BrainAnalyzer {
    async fn analyze(&self, text: &str) -> Result<LinguisticSummary, AppError> {
        Ok(self.summarize(text))
    }
}
