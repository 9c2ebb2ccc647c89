//! Wordwhirl game engine.
//!
//! This crate contains the round state machine ([`RoundState`]) and the word
//! validation logic ([`WordValidator`]) used by the terminal client.
//!
//! ## Determinism requirements
//! - Root-word selection derives only from the provided RNG; no ambient randomness.
//! - Dictionary lookups must be total and side-effect free for a fixed backing set.
//! - Validation never mutates round state; only [`RoundState::commit`] does.
//!
//! ## Persistence invariants
//! The high score is read from the [`HighScoreStore`] exactly once, at round-state
//! construction, and written back on every new high score under a single key
//! ([`HIGH_SCORE_KEY`]). Reads and writes must agree on that key.

pub mod dictionary;
pub mod round;
pub mod store;
pub mod validate;
pub mod wordlist;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use dictionary::{Dictionary, WordSetDictionary, DEFAULT_LOCALE};
pub use round::{RoundError, RoundState};
pub use store::{HighScoreStore, HIGH_SCORE_KEY};
pub use validate::{normalize, Verdict, WordValidator};
pub use wordlist::{WordListError, WordPool};

#[cfg(any(test, feature = "mocks"))]
pub use mocks::{MemoryStore, StaticDictionary};
