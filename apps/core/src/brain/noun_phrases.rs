//! Noun-phrase chunking.
//!
//! A lightweight chunker for short queries: a phrase is a maximal run of
//! content words. Stopwords, numbers and punctuation end the current run.

use super::keywords::STOPWORDS_EN;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<word>[\p{L}\p{N}][\p{L}\p{N}'-]*)|(?P<punct>[^\s\p{L}\p{N}]+)")
        .expect("valid token regex")
});

/// Extracts noun-phrase-like chunks from text.
pub struct NounPhraseExtractor {
    stopwords: HashSet<&'static str>,
    max_phrases: usize,
}

impl Default for NounPhraseExtractor {
    fn default() -> Self {
        Self::new(8)
    }
}

impl NounPhraseExtractor {
    pub fn new(max_phrases: usize) -> Self {
        Self {
            stopwords: STOPWORDS_EN.iter().copied().collect(),
            max_phrases,
        }
    }

    /// Lowercased phrases, de-duplicated, in order of first appearance.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut phrases: Vec<String> = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for caps in TOKEN_RE.captures_iter(text) {
            let Some(word) = caps.name("word") else {
                flush(&mut current, &mut phrases);
                continue;
            };

            let word = word.as_str().trim_end_matches(['\'', '-']).to_lowercase();
            let is_number = word.chars().all(|c| c.is_numeric());
            if word.is_empty() || is_number || self.stopwords.contains(word.as_str()) {
                flush(&mut current, &mut phrases);
            } else {
                current.push(word);
            }
        }
        flush(&mut current, &mut phrases);

        phrases.truncate(self.max_phrases);
        phrases
    }
}

fn flush(current: &mut Vec<String>, phrases: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let phrase = current.join(" ");
    if !phrases.contains(&phrase) {
        phrases.push(phrase);
    }
    current.clear();
}
