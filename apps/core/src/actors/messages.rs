use crate::catalog;
use crate::models::{BestPractice, Brief, ContentType, FieldChange};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// One organic search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    pub title: String,
    pub snippet: String,
}

/// Output of the linguistic analysis step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguisticSummary {
    /// Noun phrases found in the text.
    pub nouns: Vec<String>,
    /// Topics/entities found in the text.
    pub topics: Vec<String>,
}

impl LinguisticSummary {
    pub fn nouns_summary(&self) -> String {
        self.nouns.join(", ")
    }

    pub fn topics_summary(&self) -> String {
        self.topics.join(", ")
    }
}

/// Title, description and outline proposed for a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentSuggestion {
    pub title: String,
    pub description: String,
    pub outline: String,
}

impl EnrichmentSuggestion {
    /// The field changes that merge this suggestion into a brief.
    pub fn into_changes(self) -> Vec<FieldChange> {
        vec![
            FieldChange::Title(self.title),
            FieldChange::Description(self.description),
            FieldChange::Outline(self.outline),
        ]
    }
}

/// Identifies one in-flight enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentTicket {
    pub keyword: String,
    /// Keyword generation at the time the enrichment started.
    pub generation: u64,
}

/// How an analyze-keyword request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentOutcome {
    /// The suggestion was merged into the brief.
    Applied(Brief),
    /// Another enrichment is in flight; nothing was started.
    AlreadyRunning,
    /// The keyword changed while the request was in flight; the result was discarded.
    Stale,
}

/// Observable state exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefView {
    pub brief: Brief,
    /// Content types valid for the current core topic.
    pub content_types: Vec<ContentType>,
    /// Best practices valid for the current content type.
    pub best_practices: Vec<BestPractice>,
    /// Best-practice selection is only enabled once a content type is chosen.
    pub practices_enabled: bool,
    pub busy: bool,
    pub last_error: Option<String>,
}

impl BriefView {
    pub fn new(brief: Brief, busy: bool, last_error: Option<String>) -> Self {
        Self {
            content_types: catalog::content_types_for(brief.core_topic).to_vec(),
            best_practices: catalog::best_practices_for(brief.content_type).to_vec(),
            practices_enabled: brief.content_type.is_some(),
            brief,
            busy,
            last_error,
        }
    }

    /// Whether the presentation layer may toggle `practice` right now.
    ///
    /// Unchecking a selected practice is always allowed. Checking one needs a
    /// content type and membership in its valid set.
    pub fn ensure_toggleable(&self, practice: BestPractice) -> Result<(), AppError> {
        if self.brief.best_practices.contains(&practice) {
            return Ok(());
        }
        if !self.practices_enabled {
            return Err(AppError::Validation(
                "Choose a content type before selecting best practices".to_string(),
            ));
        }
        if !self.best_practices.contains(&practice) {
            return Err(AppError::Validation(format!(
                "`{}` is not offered for {}",
                practice,
                self.brief.content_type.map(|c| c.label()).unwrap_or_default()
            )));
        }
        Ok(())
    }
}

/// Messages that can be sent to the `BriefActor`.
#[derive(Debug)]
pub enum BriefMessage {
    /// Apply one or more field changes atomically.
    ApplyChanges {
        changes: Vec<FieldChange>,
        responder: oneshot::Sender<Result<BriefView, AppError>>,
    },
    /// Toggle a single best practice.
    TogglePractice {
        practice: BestPractice,
        responder: oneshot::Sender<Result<BriefView, AppError>>,
    },
    /// Replace the outline with the local template.
    GenerateOutline {
        responder: oneshot::Sender<Result<BriefView, AppError>>,
    },
    /// Start keyword enrichment. The responder fires when it completes.
    AnalyzeKeyword {
        responder: oneshot::Sender<Result<EnrichmentOutcome, AppError>>,
    },
    /// Internal: an enrichment task finished.
    EnrichmentFinished {
        ticket: EnrichmentTicket,
        result: Result<EnrichmentSuggestion, AppError>,
    },
    /// Read the current observable state.
    Snapshot {
        responder: oneshot::Sender<BriefView>,
    },
    /// A command to shut down the actor.
    Shutdown,
}
