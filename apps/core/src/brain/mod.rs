//! # Brain Module
//!
//! Fast, local linguistic analysis used by keyword enrichment.
//!
//! ## Components
//! - `noun_phrases`: stopword-delimited noun-phrase chunking
//! - `keywords`: TF-IDF topic extraction
//! - `analyzer`: `LinguisticAnalyzer` implementation combining both

pub mod analyzer;
pub mod keywords;
pub mod noun_phrases;

pub use analyzer::BrainAnalyzer;
pub use keywords::{KeywordExtractor, KeywordResult};
pub use noun_phrases::NounPhraseExtractor;
