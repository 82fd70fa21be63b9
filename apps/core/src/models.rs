use crate::error::AppError;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Word count a fresh brief starts with.
pub const DEFAULT_WORD_COUNT: u32 = 2000;

/// A core topic the writer picks for the brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Topic {
    #[serde(rename = "What Is Topical Authority and Why It Matters")]
    WhatIsTopicalAuthority,
    #[serde(rename = "Developing a Topical Authority Strategy")]
    DevelopingStrategy,
    #[serde(rename = "Best Practices for Content Creation")]
    ContentCreationPractices,
    #[serde(rename = "On-Page Optimization for Topical Authority")]
    OnPageOptimization,
    #[serde(rename = "Measuring and Improving Topical Authority")]
    MeasuringAuthority,
    #[serde(rename = "Common Mistakes and How to Avoid Them")]
    CommonMistakes,
    #[serde(rename = "Future-Proofing Your Topical Authority Efforts")]
    FutureProofing,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::WhatIsTopicalAuthority,
        Topic::DevelopingStrategy,
        Topic::ContentCreationPractices,
        Topic::OnPageOptimization,
        Topic::MeasuringAuthority,
        Topic::CommonMistakes,
        Topic::FutureProofing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Topic::WhatIsTopicalAuthority => "What Is Topical Authority and Why It Matters",
            Topic::DevelopingStrategy => "Developing a Topical Authority Strategy",
            Topic::ContentCreationPractices => "Best Practices for Content Creation",
            Topic::OnPageOptimization => "On-Page Optimization for Topical Authority",
            Topic::MeasuringAuthority => "Measuring and Improving Topical Authority",
            Topic::CommonMistakes => "Common Mistakes and How to Avoid Them",
            Topic::FutureProofing => "Future-Proofing Your Topical Authority Efforts",
        }
    }
}

/// Format of the planned content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "In-Depth Guide")]
    InDepthGuide,
    #[serde(rename = "Case Study")]
    CaseStudy,
    #[serde(rename = "How-To Tutorial")]
    HowToTutorial,
    #[serde(rename = "Listicle")]
    Listicle,
    #[serde(rename = "Opinion Piece")]
    OpinionPiece,
    #[serde(rename = "Infographic")]
    Infographic,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::InDepthGuide,
        ContentType::CaseStudy,
        ContentType::HowToTutorial,
        ContentType::Listicle,
        ContentType::OpinionPiece,
        ContentType::Infographic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::InDepthGuide => "In-Depth Guide",
            ContentType::CaseStudy => "Case Study",
            ContentType::HowToTutorial => "How-To Tutorial",
            ContentType::Listicle => "Listicle",
            ContentType::OpinionPiece => "Opinion Piece",
            ContentType::Infographic => "Infographic",
        }
    }
}

/// SEO/content recommendation tag. Ordering follows the catalog, so sets
/// of practices always iterate in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BestPractice {
    #[serde(rename = "Incorporate User Intent")]
    UserIntent,
    #[serde(rename = "Use Data and Examples")]
    DataAndExamples,
    #[serde(rename = "Optimize for Semantic SEO")]
    SemanticSeo,
    #[serde(rename = "Include Multimedia")]
    Multimedia,
    #[serde(rename = "Internal Linking")]
    InternalLinking,
    #[serde(rename = "Schema Markup")]
    SchemaMarkup,
    #[serde(rename = "Track Metrics like Traffic and Engagement")]
    TrackMetrics,
}

impl BestPractice {
    pub const ALL: [BestPractice; 7] = [
        BestPractice::UserIntent,
        BestPractice::DataAndExamples,
        BestPractice::SemanticSeo,
        BestPractice::Multimedia,
        BestPractice::InternalLinking,
        BestPractice::SchemaMarkup,
        BestPractice::TrackMetrics,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BestPractice::UserIntent => "Incorporate User Intent",
            BestPractice::DataAndExamples => "Use Data and Examples",
            BestPractice::SemanticSeo => "Optimize for Semantic SEO",
            BestPractice::Multimedia => "Include Multimedia",
            BestPractice::InternalLinking => "Internal Linking",
            BestPractice::SchemaMarkup => "Schema Markup",
            BestPractice::TrackMetrics => "Track Metrics like Traffic and Engagement",
        }
    }
}

fn parse_label<T: Copy>(
    kind: &str,
    raw: &str,
    all: &[T],
    label: impl Fn(T) -> &'static str,
) -> Result<T, AppError> {
    let wanted = raw.trim();
    all.iter()
        .copied()
        .find(|candidate| label(*candidate).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| AppError::Validation(format!("unknown {}: `{}`", kind, wanted)))
}

impl FromStr for Topic {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("topic", s, &Topic::ALL, Topic::label)
    }
}

impl FromStr for ContentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("content type", s, &ContentType::ALL, ContentType::label)
    }
}

impl FromStr for BestPractice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("best practice", s, &BestPractice::ALL, BestPractice::label)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for BestPractice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The content brief being built. Exactly one is live at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Brief {
    /// Free-text seed keyword used for enrichment.
    pub keyword: String,
    pub title: String,
    pub description: String,
    #[serde(with = "empty_as_none")]
    pub core_topic: Option<Topic>,
    /// Comma-separated related keywords.
    pub keyword_cluster: String,
    #[serde(with = "empty_as_none")]
    pub content_type: Option<ContentType>,
    pub target_audience: String,
    #[serde(deserialize_with = "lenient_word_count")]
    pub word_count: u32,
    pub best_practices: BTreeSet<BestPractice>,
    /// Newline-delimited outline sections.
    pub outline: String,
}

impl Default for Brief {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            title: String::new(),
            description: String::new(),
            core_topic: None,
            keyword_cluster: String::new(),
            content_type: None,
            target_audience: String::new(),
            word_count: DEFAULT_WORD_COUNT,
            best_practices: BTreeSet::new(),
            outline: String::new(),
        }
    }
}

impl Brief {
    /// Trimmed, non-empty, de-duplicated cluster terms in entry order.
    pub fn keyword_cluster_terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for term in self.keyword_cluster.split(',').map(str::trim) {
            if !term.is_empty() && !terms.iter().any(|t| t.eq_ignore_ascii_case(term)) {
                terms.push(term.to_string());
            }
        }
        terms
    }
}

/// A single field edit coming from the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Keyword(String),
    KeywordCluster(String),
    Title(String),
    Description(String),
    CoreTopic(Option<Topic>),
    ContentType(Option<ContentType>),
    TargetAudience(String),
    WordCount(u32),
    Outline(String),
}

impl FieldChange {
    /// Converts a `{fieldName, newValue}` event into a typed change.
    ///
    /// Field names are accepted in camelCase or snake_case. An empty value
    /// clears `coreTopic` and `contentType`.
    pub fn parse(field_name: &str, value: &str) -> Result<Self, AppError> {
        let normalized: String = field_name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        let change = match normalized.as_str() {
            "keyword" => FieldChange::Keyword(value.to_string()),
            "keywordcluster" => FieldChange::KeywordCluster(value.to_string()),
            "title" => FieldChange::Title(value.to_string()),
            "description" => FieldChange::Description(value.to_string()),
            "coretopic" => FieldChange::CoreTopic(parse_optional(value)?),
            "contenttype" => FieldChange::ContentType(parse_optional(value)?),
            "targetaudience" => FieldChange::TargetAudience(value.to_string()),
            "wordcount" => FieldChange::WordCount(parse_word_count(value)?),
            "outline" => FieldChange::Outline(value.to_string()),
            _ => {
                return Err(AppError::Validation(format!(
                    "unknown brief field: `{}`",
                    field_name
                )))
            }
        };
        Ok(change)
    }

    /// Name of the field this change targets, in snapshot (camelCase) form.
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldChange::Keyword(_) => "keyword",
            FieldChange::KeywordCluster(_) => "keywordCluster",
            FieldChange::Title(_) => "title",
            FieldChange::Description(_) => "description",
            FieldChange::CoreTopic(_) => "coreTopic",
            FieldChange::ContentType(_) => "contentType",
            FieldChange::TargetAudience(_) => "targetAudience",
            FieldChange::WordCount(_) => "wordCount",
            FieldChange::Outline(_) => "outline",
        }
    }
}

fn parse_optional<T: FromStr<Err = AppError>>(value: &str) -> Result<Option<T>, AppError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

fn parse_word_count(value: &str) -> Result<u32, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u32>().map_err(|_| {
        AppError::Validation(format!(
            "word count must be a non-negative integer, got `{}`",
            trimmed
        ))
    })
}

/// Older snapshots stored the word count as the raw input string.
fn lenient_word_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WordCountRepr {
        Number(u32),
        Text(String),
    }

    match WordCountRepr::deserialize(deserializer)? {
        WordCountRepr::Number(n) => Ok(n),
        WordCountRepr::Text(text) => parse_word_count(&text).map_err(de::Error::custom),
    }
}

/// Serializes `None` as `""` and reads `""` back as `None`.
mod empty_as_none {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr<Err = AppError>,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        parse_optional(&raw).map_err(de::Error::custom)
    }
}
