//! Option Catalog
//!
//! Static option sets and the two dependency mappings that drive the brief:
//! core topic -> content types, and content type -> best practices.
//! Both lookups are total: a key without an explicit mapping (including the
//! empty selection) falls back to the full catalog in catalog order.

use crate::models::{BestPractice, ContentType, Topic};

const DEFAULT_CONTENT_TYPES: &[ContentType] = &ContentType::ALL;
const DEFAULT_BEST_PRACTICES: &[BestPractice] = &BestPractice::ALL;

/// All selectable core topics, in display order.
pub fn topics() -> &'static [Topic] {
    &Topic::ALL
}

/// Content types valid for `topic`.
pub fn content_types_for(topic: Option<Topic>) -> &'static [ContentType] {
    use ContentType::*;

    match topic {
        Some(Topic::WhatIsTopicalAuthority) => &[InDepthGuide, Listicle, Infographic],
        Some(Topic::DevelopingStrategy) => &[InDepthGuide, CaseStudy, HowToTutorial],
        Some(Topic::ContentCreationPractices) => &[OpinionPiece, Infographic],
        Some(Topic::OnPageOptimization) => &[HowToTutorial, Listicle, InDepthGuide],
        Some(Topic::MeasuringAuthority) => &[CaseStudy, Infographic],
        Some(Topic::CommonMistakes) => &[Listicle, OpinionPiece],
        Some(Topic::FutureProofing) | None => DEFAULT_CONTENT_TYPES,
    }
}

/// Best practices valid for `content_type`.
pub fn best_practices_for(content_type: Option<ContentType>) -> &'static [BestPractice] {
    use BestPractice::*;

    match content_type {
        Some(ContentType::InDepthGuide) => {
            &[UserIntent, DataAndExamples, InternalLinking, SchemaMarkup]
        }
        Some(ContentType::CaseStudy) => &[DataAndExamples, Multimedia, TrackMetrics],
        Some(ContentType::HowToTutorial) => &[UserIntent, Multimedia, SchemaMarkup],
        Some(ContentType::Listicle) => &[SemanticSeo, InternalLinking],
        Some(ContentType::OpinionPiece) => &[UserIntent, SchemaMarkup],
        Some(ContentType::Infographic) | None => DEFAULT_BEST_PRACTICES,
    }
}
