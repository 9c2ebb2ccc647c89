//! Test doubles for the engine's collaborator seams.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::dictionary::Dictionary;
use crate::store::HighScoreStore;

/// In-memory key-value store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
    writes: usize,
}

impl MemoryStore {
    /// Number of `set_integer` calls observed.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn get_integer(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

/// Dictionary recognizing a fixed set of words in any locale.
#[derive(Debug, Clone, Default)]
pub struct StaticDictionary {
    words: HashSet<String>,
}

impl StaticDictionary {
    pub fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl Dictionary for StaticDictionary {
    fn is_recognized(&self, word: &str, _locale: &str) -> bool {
        self.words.contains(word)
    }
}
