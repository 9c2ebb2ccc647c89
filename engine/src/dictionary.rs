//! Dictionary seam.
//!
//! Recognition is delegated to an opaque collaborator: a total, side-effect-free
//! boolean function over a (word, locale) pair. The production implementation is
//! a lowercased word set loaded from newline-separated text.

use std::collections::HashSet;

/// The single locale this game plays in.
pub const DEFAULT_LOCALE: &str = "en";

/// Membership oracle for real words.
///
/// Must be deterministic for a fixed backing dictionary.
pub trait Dictionary {
    fn is_recognized(&self, word: &str, locale: &str) -> bool;
}

/// Dictionary backed by an in-memory word set, bound to one locale.
#[derive(Debug, Clone)]
pub struct WordSetDictionary {
    words: HashSet<String>,
    locale: String,
}

impl WordSetDictionary {
    /// Builds a dictionary from newline-separated text. Entries are trimmed
    /// and lowercased; blank lines are skipped.
    pub fn from_text(text: &str, locale: &str) -> Self {
        let words = text
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        Self {
            words,
            locale: locale.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Dictionary for WordSetDictionary {
    fn is_recognized(&self, word: &str, locale: &str) -> bool {
        locale == self.locale && self.words.contains(word)
    }
}
