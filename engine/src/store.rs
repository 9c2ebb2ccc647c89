//! High-score persistence seam.
//!
//! The engine never touches the filesystem directly; it talks to a key-value
//! store through [`HighScoreStore`] and uses exactly one key.

use anyhow::Result;

/// The single key used for the persisted high score.
///
/// Reads and writes must use the same key; a read/write mismatch silently
/// loses the high score across launches.
pub const HIGH_SCORE_KEY: &str = "high_score";

/// Integer key-value store backing the persisted high score.
///
/// Implementations must be deterministic: a `get_integer` after a successful
/// `set_integer` for the same key returns the value written.
pub trait HighScoreStore {
    /// Returns the stored value for `key`, or 0 when absent.
    fn get_integer(&self, key: &str) -> u32;

    /// Stores `value` under `key`.
    fn set_integer(&mut self, key: &str, value: u32) -> Result<()>;
}
