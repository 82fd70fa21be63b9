use crate::models::Brief;

/// Static sections following the topic-specific introduction.
const OUTLINE_SECTIONS: [&str; 5] = [
    "Key Concepts and Definitions",
    "Strategies and Best Practices",
    "Optimization Tips",
    "Measurement and Metrics",
    "Conclusion and Future Trends",
];

/// Builds the six-section local outline for the brief's core topic.
pub fn generate_outline(brief: &Brief) -> String {
    outline_for(brief.core_topic.map(|t| t.label()).unwrap_or_default())
}

/// Outline template with `topic` in the introduction line.
pub fn outline_for(topic: &str) -> String {
    let mut sections = Vec::with_capacity(OUTLINE_SECTIONS.len() + 1);
    sections.push(format!("Introduction: Define {}", topic));
    sections.extend(OUTLINE_SECTIONS.iter().map(|s| s.to_string()));
    sections.join("\n")
}
