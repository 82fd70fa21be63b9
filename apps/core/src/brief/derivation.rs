//! Derivation Engine
//!
//! Applies one field change to a brief and re-derives the dependent option
//! sets in the same step, so an inconsistent brief is never observable:
//! 1. `coreTopic` changed: clear `contentType` if it is no longer valid.
//! 2. `contentType` changed (or cleared by step 1): drop selected best
//!    practices that are not valid for the new content type.
//! 3. Any other field: assigned as-is.

use crate::catalog;
use crate::models::{BestPractice, Brief, ContentType, FieldChange};

/// What a field change silently removed from the brief.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Content type cleared because it is not valid for the current topic.
    pub cleared_content_type: Option<ContentType>,
    /// Best practices dropped because they are not valid for the content type.
    pub dropped_practices: Vec<BestPractice>,
}

impl PruneReport {
    pub fn is_empty(&self) -> bool {
        self.cleared_content_type.is_none() && self.dropped_practices.is_empty()
    }

    pub(crate) fn merge(&mut self, other: PruneReport) {
        if other.cleared_content_type.is_some() {
            self.cleared_content_type = other.cleared_content_type;
        }
        self.dropped_practices.extend(other.dropped_practices);
    }
}

/// Result of a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub brief: Brief,
    pub pruned: PruneReport,
}

/// Applies `change` to `brief` and prunes now-invalid selections.
pub fn apply_field_change(mut brief: Brief, change: FieldChange) -> Derivation {
    let mut pruned = PruneReport::default();

    match change {
        FieldChange::CoreTopic(topic) => {
            brief.core_topic = topic;
            pruned.merge(revalidate_content_type(&mut brief));
        }
        FieldChange::ContentType(content_type) => {
            brief.content_type = content_type;
            pruned.merge(revalidate_content_type(&mut brief));
            pruned.merge(prune_practices(&mut brief));
        }
        FieldChange::Keyword(value) => brief.keyword = value,
        FieldChange::KeywordCluster(value) => brief.keyword_cluster = value,
        FieldChange::Title(value) => brief.title = value,
        FieldChange::Description(value) => brief.description = value,
        FieldChange::TargetAudience(value) => brief.target_audience = value,
        FieldChange::WordCount(value) => brief.word_count = value,
        FieldChange::Outline(value) => brief.outline = value,
    }

    Derivation { brief, pruned }
}

/// Re-derives the dependent selections of a brief that did not come through
/// `apply_field_change`, such as a snapshot written by an older catalog.
///
/// A brief that already satisfies the catalog is returned unchanged.
pub fn revalidate(mut brief: Brief) -> Derivation {
    let mut pruned = revalidate_content_type(&mut brief);
    pruned.merge(prune_practices(&mut brief));
    Derivation { brief, pruned }
}

/// Adds `practice` if absent, removes it otherwise.
///
/// Membership in the currently valid set is not re-checked here; the
/// presentation layer only offers valid practices, and a stale one is
/// dropped by the next content-type change.
pub fn toggle_practice(mut brief: Brief, practice: BestPractice) -> Brief {
    if !brief.best_practices.remove(&practice) {
        brief.best_practices.insert(practice);
    }
    brief
}

/// Clears the content type when it falls outside the topic's valid set,
/// cascading into best-practice pruning.
fn revalidate_content_type(brief: &mut Brief) -> PruneReport {
    let mut report = PruneReport::default();
    let Some(current) = brief.content_type else {
        return report;
    };

    if !catalog::content_types_for(brief.core_topic).contains(&current) {
        brief.content_type = None;
        report.cleared_content_type = Some(current);
        report.merge(prune_practices(brief));
    }
    report
}

fn prune_practices(brief: &mut Brief) -> PruneReport {
    let valid = catalog::best_practices_for(brief.content_type);
    let mut dropped = Vec::new();
    brief.best_practices.retain(|practice| {
        let keep = valid.contains(practice);
        if !keep {
            dropped.push(*practice);
        }
        keep
    });
    PruneReport {
        cleared_content_type: None,
        dropped_practices: dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Topic;

    fn brief_with(topic: Option<Topic>, content_type: Option<ContentType>) -> Brief {
        Brief {
            core_topic: topic,
            content_type,
            ..Brief::default()
        }
    }

    #[test]
    fn test_revalidate_repairs_inconsistent_brief() {
        let mut brief = brief_with(
            Some(Topic::ContentCreationPractices),
            Some(ContentType::Listicle),
        );
        brief.best_practices.insert(BestPractice::SchemaMarkup);

        let result = revalidate(brief);

        assert_eq!(result.brief.content_type, None);
        assert_eq!(result.pruned.cleared_content_type, Some(ContentType::Listicle));
        // The default set still allows Schema Markup once the type is cleared.
        assert!(result.brief.best_practices.contains(&BestPractice::SchemaMarkup));
    }

    #[test]
    fn test_revalidate_drops_practices_invalid_for_kept_type() {
        let mut brief = brief_with(Some(Topic::CommonMistakes), Some(ContentType::Listicle));
        brief.best_practices.insert(BestPractice::SchemaMarkup);
        brief.best_practices.insert(BestPractice::InternalLinking);

        let result = revalidate(brief);

        assert_eq!(result.brief.content_type, Some(ContentType::Listicle));
        assert_eq!(result.pruned.dropped_practices, vec![BestPractice::SchemaMarkup]);
        assert!(result.brief.best_practices.contains(&BestPractice::InternalLinking));
    }

    #[test]
    fn test_revalidate_keeps_consistent_brief() {
        let mut brief = brief_with(
            Some(Topic::ContentCreationPractices),
            Some(ContentType::OpinionPiece),
        );
        brief.best_practices.insert(BestPractice::UserIntent);

        let result = revalidate(brief.clone());

        assert_eq!(result.brief, brief);
        assert!(result.pruned.is_empty());
    }

    #[test]
    fn test_topic_change_clears_incompatible_content_type() {
        let brief = brief_with(
            Some(Topic::DevelopingStrategy),
            Some(ContentType::CaseStudy),
        );

        let result = apply_field_change(
            brief,
            FieldChange::CoreTopic(Some(Topic::ContentCreationPractices)),
        );

        assert_eq!(result.brief.content_type, None);
        assert_eq!(
            result.pruned.cleared_content_type,
            Some(ContentType::CaseStudy)
        );
    }

    #[test]
    fn test_topic_change_keeps_compatible_content_type() {
        let mut brief = brief_with(
            Some(Topic::DevelopingStrategy),
            Some(ContentType::InDepthGuide),
        );
        brief.best_practices.insert(BestPractice::SchemaMarkup);

        let result = apply_field_change(
            brief,
            FieldChange::CoreTopic(Some(Topic::OnPageOptimization)),
        );

        assert_eq!(result.brief.content_type, Some(ContentType::InDepthGuide));
        assert!(result.brief.best_practices.contains(&BestPractice::SchemaMarkup));
        assert!(result.pruned.is_empty());
    }

    #[test]
    fn test_cleared_content_type_rederives_from_default_set() {
        let mut brief = brief_with(
            Some(Topic::CommonMistakes),
            Some(ContentType::Listicle),
        );
        brief.best_practices.insert(BestPractice::InternalLinking);

        let result = apply_field_change(
            brief,
            FieldChange::CoreTopic(Some(Topic::MeasuringAuthority)),
        );

        assert_eq!(result.brief.content_type, None);
        let default_set = catalog::best_practices_for(None);
        assert!(result
            .brief
            .best_practices
            .iter()
            .all(|p| default_set.contains(p)));
    }

    #[test]
    fn test_content_type_change_prunes_practices() {
        let mut brief = Brief::default();
        brief.best_practices.insert(BestPractice::SchemaMarkup);

        let result = apply_field_change(brief, FieldChange::ContentType(Some(ContentType::Listicle)));

        assert!(result.brief.best_practices.is_empty());
        assert_eq!(
            result.pruned.dropped_practices,
            vec![BestPractice::SchemaMarkup]
        );
    }

    #[test]
    fn test_content_type_outside_topic_set_is_pruned() {
        let brief = brief_with(Some(Topic::ContentCreationPractices), None);

        let result = apply_field_change(brief, FieldChange::ContentType(Some(ContentType::Listicle)));

        assert_eq!(result.brief.content_type, None);
        assert_eq!(result.pruned.cleared_content_type, Some(ContentType::Listicle));
    }

    #[test]
    fn test_plain_fields_have_no_side_effects() {
        let mut brief = brief_with(
            Some(Topic::ContentCreationPractices),
            Some(ContentType::OpinionPiece),
        );
        brief.best_practices.insert(BestPractice::UserIntent);

        let changes = vec![
            FieldChange::Title("A title".to_string()),
            FieldChange::Keyword("topical authority".to_string()),
            FieldChange::Description("desc".to_string()),
            FieldChange::TargetAudience("editors".to_string()),
            FieldChange::WordCount(1200),
        ];

        let mut current = brief.clone();
        for change in changes {
            let result = apply_field_change(current, change);
            assert!(result.pruned.is_empty());
            current = result.brief;
        }

        assert_eq!(current.content_type, brief.content_type);
        assert_eq!(current.best_practices, brief.best_practices);
        assert_eq!(current.word_count, 1200);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut brief = Brief::default();
        brief.best_practices.insert(BestPractice::UserIntent);

        for practice in BestPractice::ALL {
            let once = toggle_practice(brief.clone(), practice);
            assert_ne!(once.best_practices, brief.best_practices);
            let twice = toggle_practice(once, practice);
            assert_eq!(twice.best_practices, brief.best_practices);
        }
    }

    #[test]
    fn test_toggle_does_not_validate_membership() {
        let brief = brief_with(None, Some(ContentType::Listicle));
        let toggled = toggle_practice(brief, BestPractice::SchemaMarkup);
        assert!(toggled.best_practices.contains(&BestPractice::SchemaMarkup));
    }
}
