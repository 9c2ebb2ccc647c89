//! Round state machine.
//!
//! A round is `Uninitialized` until the first [`RoundState::start_round`], then
//! `Active` until the process exits or the round is restarted in place. There is
//! no terminal state.
//!
//! All mutation lives here. The validator reads this state but never writes it;
//! [`RoundState::commit`] must only be called for words the validator accepted,
//! which keeps the `used_words` invariant (every entry passed validation against
//! the root word active at insertion time).

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::store::{HighScoreStore, HIGH_SCORE_KEY};
use crate::wordlist::WordPool;

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("no active round; start_round must be called first")]
    NotStarted,
    #[error("failed to persist high score")]
    Store(#[source] anyhow::Error),
}

/// Mutable state for one play session.
#[derive(Debug)]
pub struct RoundState {
    /// `None` while uninitialized; immutable for the round's lifetime once set.
    root_word: Option<String>,
    /// Accepted words, most-recent-first.
    used_words: Vec<String>,
    score: u32,
    /// Monotonically non-decreasing; survives round resets.
    high_score: u32,
}

impl RoundState {
    /// Creates an uninitialized round, reading the persisted high score once.
    pub fn new(store: &impl HighScoreStore) -> Self {
        let high_score = store.get_integer(HIGH_SCORE_KEY);
        Self {
            root_word: None,
            used_words: Vec::new(),
            score: 0,
            high_score,
        }
    }

    /// Starts (or restarts) a round: picks a root word uniformly at random,
    /// clears the used-word list, and zeroes the score. The high score is left
    /// untouched.
    pub fn start_round<R: Rng>(&mut self, pool: &WordPool, rng: &mut R) {
        let root = pool.choose(rng).to_string();
        info!(root_word = %root, "round started");
        self.root_word = Some(root);
        self.used_words.clear();
        self.score = 0;
    }

    /// Records an accepted word: inserts it at the front of the used-word list
    /// and scores one point per character. A new high score is written to the
    /// store before this returns.
    ///
    /// Callers must only pass words the validator accepted for the current round.
    pub fn commit(&mut self, word: &str, store: &mut impl HighScoreStore) -> Result<(), RoundError> {
        if self.root_word.is_none() {
            return Err(RoundError::NotStarted);
        }
        let points = word.chars().count() as u32;
        self.used_words.insert(0, word.to_string());
        self.score += points;
        debug!(word, points, score = self.score, "word committed");
        if self.score > self.high_score {
            self.high_score = self.score;
            store
                .set_integer(HIGH_SCORE_KEY, self.high_score)
                .map_err(RoundError::Store)?;
            info!(high_score = self.high_score, "new high score");
        }
        Ok(())
    }

    /// `true` once a round has been started.
    pub fn is_active(&self) -> bool {
        self.root_word.is_some()
    }

    pub fn root_word(&self) -> Option<&str> {
        self.root_word.as_deref()
    }

    /// Accepted words, most-recent-first.
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    /// Exact-match membership test against the used-word list. Both sides are
    /// expected to be normalized (lowercase, trimmed) already.
    pub fn contains(&self, word: &str) -> bool {
        self.used_words.iter().any(|used| used == word)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MemoryStore;
    use rand::{rngs::StdRng, SeedableRng};

    fn pool(words: &str) -> WordPool {
        WordPool::parse(words).unwrap()
    }

    fn started(store: &MemoryStore) -> RoundState {
        let mut state = RoundState::new(store);
        let mut rng = StdRng::seed_from_u64(1);
        state.start_round(&pool("silkworm"), &mut rng);
        state
    }

    #[test]
    fn test_new_round_is_uninitialized() {
        let store = MemoryStore::default();
        let state = RoundState::new(&store);
        assert!(!state.is_active());
        assert_eq!(state.root_word(), None);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_commit_before_start_fails() {
        let mut store = MemoryStore::default();
        let mut state = RoundState::new(&store);
        assert!(matches!(
            state.commit("worm", &mut store),
            Err(RoundError::NotStarted)
        ));
        assert!(state.used_words().is_empty());
    }

    #[test]
    fn test_commit_is_strictly_additive() {
        let mut store = MemoryStore::default();
        let mut state = started(&store);
        state.commit("silk", &mut store).unwrap();
        state.commit("worms", &mut store).unwrap();
        assert_eq!(state.score(), 9);
    }

    #[test]
    fn test_commit_orders_most_recent_first() {
        let mut store = MemoryStore::default();
        let mut state = started(&store);
        state.commit("silk", &mut store).unwrap();
        state.commit("worm", &mut store).unwrap();
        assert_eq!(state.used_words(), &["worm".to_string(), "silk".to_string()]);
        assert!(state.contains("silk"));
        assert!(!state.contains("milk"));
    }

    #[test]
    fn test_start_round_resets_words_and_score_but_not_high_score() {
        let mut store = MemoryStore::default();
        let mut state = started(&store);
        state.commit("silkworm", &mut store).unwrap();
        assert_eq!(state.high_score(), 8);

        let mut rng = StdRng::seed_from_u64(2);
        state.start_round(&pool("absolute"), &mut rng);
        assert!(state.used_words().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 8);
        assert_eq!(state.root_word(), Some("absolute"));
    }

    #[test]
    fn test_high_score_is_max_across_rounds() {
        let mut store = MemoryStore::default();
        let mut state = started(&store);
        let mut rng = StdRng::seed_from_u64(3);

        state.commit("silkworm", &mut store).unwrap();
        state.commit("worm", &mut store).unwrap();
        assert_eq!(state.high_score(), 12);

        // A weaker follow-up round must not lower it.
        state.start_round(&pool("silkworm"), &mut rng);
        state.commit("silk", &mut store).unwrap();
        assert_eq!(state.score(), 4);
        assert_eq!(state.high_score(), 12);
        assert_eq!(store.get_integer(HIGH_SCORE_KEY), 12);
    }

    #[test]
    fn test_high_score_persisted_on_every_new_high() {
        let mut store = MemoryStore::default();
        let mut state = started(&store);
        state.commit("silk", &mut store).unwrap();
        assert_eq!(store.get_integer(HIGH_SCORE_KEY), 4);
        state.commit("worm", &mut store).unwrap();
        assert_eq!(store.get_integer(HIGH_SCORE_KEY), 8);
    }

    #[test]
    fn test_high_score_loaded_once_at_construction() {
        let mut store = MemoryStore::default();
        store.set_integer(HIGH_SCORE_KEY, 40).unwrap();
        let state = started(&store);
        assert_eq!(state.high_score(), 40);
    }

    #[test]
    fn test_no_store_write_below_existing_high_score() {
        let mut store = MemoryStore::default();
        store.set_integer(HIGH_SCORE_KEY, 40).unwrap();
        let mut state = started(&store);
        state.commit("silk", &mut store).unwrap();
        assert_eq!(store.writes(), 1, "only the seeding write should have happened");
        assert_eq!(store.get_integer(HIGH_SCORE_KEY), 40);
    }
}
