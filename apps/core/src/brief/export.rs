use crate::error::AppError;
use crate::models::Brief;
use std::fmt::Write;

const NOT_SET: &str = "_not set_";

fn or_not_set(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SET
    } else {
        value
    }
}

/// Renders the brief preview as a Markdown document.
pub fn render_markdown(brief: &Brief) -> String {
    let mut out = String::from("# Content Brief\n\n");

    let scalar_fields = [
        ("Title", brief.title.as_str()),
        ("Core Topic", brief.core_topic.map(|t| t.label()).unwrap_or_default()),
        ("Keyword", brief.keyword.as_str()),
        ("Keyword Cluster", brief.keyword_cluster.as_str()),
        ("Content Type", brief.content_type.map(|c| c.label()).unwrap_or_default()),
        ("Target Audience", brief.target_audience.as_str()),
        ("Description", brief.description.as_str()),
    ];
    for (label, value) in scalar_fields {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "**{}:** {}\n", label, or_not_set(value));
    }
    let _ = writeln!(out, "**Word Count:** {}\n", brief.word_count);

    out.push_str("## Best Practices\n\n");
    if brief.best_practices.is_empty() {
        let _ = writeln!(out, "{}\n", NOT_SET);
    } else {
        for practice in &brief.best_practices {
            let _ = writeln!(out, "- {}", practice);
        }
        out.push('\n');
    }

    out.push_str("## Outline\n\n");
    if brief.outline.trim().is_empty() {
        let _ = writeln!(out, "{}", NOT_SET);
    } else {
        for section in brief.outline.lines().filter(|l| !l.trim().is_empty()) {
            let _ = writeln!(out, "1. {}", section.trim());
        }
    }

    out
}

/// Pretty-printed JSON snapshot of the brief.
pub fn render_json(brief: &Brief) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(brief)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BestPractice, ContentType, Topic};

    #[test]
    fn test_markdown_lists_practices_in_catalog_order() {
        let mut brief = Brief {
            title: "Topical Authority 101".to_string(),
            core_topic: Some(Topic::ContentCreationPractices),
            content_type: Some(ContentType::OpinionPiece),
            outline: "Intro\nBody\n\nEnd".to_string(),
            ..Brief::default()
        };
        brief.best_practices.insert(BestPractice::SchemaMarkup);
        brief.best_practices.insert(BestPractice::UserIntent);

        let md = render_markdown(&brief);

        assert!(md.contains("**Title:** Topical Authority 101"));
        assert!(md.contains("**Content Type:** Opinion Piece"));
        let intent = md.find("- Incorporate User Intent").unwrap();
        let schema = md.find("- Schema Markup").unwrap();
        assert!(intent < schema);
        assert!(md.contains("1. Intro\n1. Body\n1. End\n"));
    }

    #[test]
    fn test_markdown_marks_empty_fields() {
        let md = render_markdown(&Brief::default());
        assert!(md.contains("**Title:** _not set_"));
        assert!(md.contains("**Word Count:** 2000"));
        assert!(md.ends_with("## Outline\n\n_not set_\n"));
    }

    #[test]
    fn test_json_export_round_trips() {
        let brief = Brief {
            keyword: "topical authority".to_string(),
            ..Brief::default()
        };
        let json = render_json(&brief).unwrap();
        let parsed: Brief = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, brief);
    }
}
