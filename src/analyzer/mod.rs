//! Word frequency analysis over translated headlines.
//!
//! Tokenization and the repetition threshold are configurable because the
//! two historical rule sets disagree: one counts every word-character run,
//! the other keeps only alphabetic tokens longer than two characters and
//! drops a fixed stop-word set. The default is the filtered rule set;
//! zeroing the knobs reproduces the plain one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration for tokenization and repetition reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Report tokens occurring strictly more than this many times (default: 2)
    pub threshold: usize,

    /// Minimum token length to count (default: 3)
    pub min_word_len: usize,

    /// Drop tokens containing digits or underscores (default: true)
    pub alphabetic_only: bool,

    /// Tokens excluded from counting entirely
    pub stop_words: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: 2,
            min_word_len: 3,
            alphabetic_only: true,
            stop_words: [
                "the", "and", "for", "with", "that", "this", "will", "are", "but", "not",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl AnalyzerConfig {
    /// The unfiltered rule set: every word-character run counts.
    pub fn unfiltered() -> Self {
        Self {
            min_word_len: 0,
            alphabetic_only: false,
            stop_words: Vec::new(),
            ..Default::default()
        }
    }

    fn keeps(&self, token: &str) -> bool {
        if token.chars().count() < self.min_word_len {
            return false;
        }
        if self.alphabetic_only && !token.chars().all(|c| c.is_alphabetic()) {
            return false;
        }
        !self.stop_words.iter().any(|s| s == token)
    }
}

/// Split `text` into lower-cased maximal runs of word characters
/// (letters, digits, underscore), then apply the configured filters.
pub fn tokenize(text: &str, config: &AnalyzerConfig) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .filter(|t| config.keeps(t))
        .map(|t| t.to_string())
        .collect()
}

/// Tally tokens across all `texts` and report those with
/// `count > config.threshold`, in order of first occurrence.
///
/// The reported set is insensitive to the order of `texts`; only the
/// cosmetic iteration order changes.
pub fn repeated_words(texts: &[String], config: &AnalyzerConfig) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for text in texts {
        for token in tokenize(text, config) {
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(token);
            }
            *count += 1;
        }
    }

    first_seen
        .into_iter()
        .filter_map(|token| {
            let count = counts[&token];
            (count > config.threshold).then_some((token, count))
        })
        .collect()
}
