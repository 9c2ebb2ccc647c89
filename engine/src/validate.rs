//! Word validation.
//!
//! Three predicates, checked in order with the first failure reported:
//! originality (not already used this round), feasibility (spellable from the
//! root word's letters, respecting multiplicity), and recognition (present in
//! the dictionary). Validation is read-only; committing an accepted word is the
//! round's job.
//!
//! Deliberately permissive: no minimum length, and resubmitting the root word
//! itself is allowed.

use std::collections::HashMap;

use crate::dictionary::Dictionary;
use crate::round::{RoundError, RoundState};

/// Outcome of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    RejectedDuplicate,
    RejectedInfeasible,
    RejectedUnrecognized,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// Alert title for rejections; `None` for an accepted word.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Verdict::Accepted => None,
            Verdict::RejectedDuplicate => Some("Word used already"),
            Verdict::RejectedInfeasible => Some("Word not possible"),
            Verdict::RejectedUnrecognized => Some("Word not recognized"),
        }
    }

    /// Alert message for rejections; `None` for an accepted word.
    pub fn message(&self, root_word: &str) -> Option<String> {
        match self {
            Verdict::Accepted => None,
            Verdict::RejectedDuplicate => Some("Be more original!".to_string()),
            Verdict::RejectedInfeasible => {
                Some(format!("You can't spell that word from '{root_word}'!"))
            }
            Verdict::RejectedUnrecognized => {
                Some("You can't just make them up, you know!".to_string())
            }
        }
    }
}

/// Pure predicate set over a candidate word and the current round.
pub struct WordValidator<D: Dictionary> {
    dictionary: D,
    locale: String,
}

impl<D: Dictionary> WordValidator<D> {
    pub fn new(dictionary: D, locale: &str) -> Self {
        Self {
            dictionary,
            locale: locale.to_string(),
        }
    }

    /// Decides whether `candidate` may be added to the round.
    ///
    /// The candidate is lowercased and trimmed first; candidates that are empty
    /// after trimming yield `Ok(None)` (silently ignored, distinct from
    /// rejection). Evaluating against a round that has not started is a caller
    /// error.
    pub fn evaluate(
        &self,
        candidate: &str,
        state: &RoundState,
    ) -> Result<Option<Verdict>, RoundError> {
        let root = state.root_word().ok_or(RoundError::NotStarted)?;
        let candidate = candidate.trim().to_lowercase();
        if candidate.is_empty() {
            return Ok(None);
        }
        if state.contains(&candidate) {
            return Ok(Some(Verdict::RejectedDuplicate));
        }
        if !feasible(&candidate, root) {
            return Ok(Some(Verdict::RejectedInfeasible));
        }
        if !self.dictionary.is_recognized(&candidate, &self.locale) {
            return Ok(Some(Verdict::RejectedUnrecognized));
        }
        Ok(Some(Verdict::Accepted))
    }
}

/// Normalizes a candidate the way [`WordValidator::evaluate`] does, for
/// callers that need the committed form.
pub fn normalize(candidate: &str) -> String {
    candidate.trim().to_lowercase()
}

/// Multiset containment: every letter of `candidate` must match a not-yet-consumed
/// occurrence of that letter in `root`. Order of consumption does not matter.
fn feasible(candidate: &str, root: &str) -> bool {
    let mut available: HashMap<char, u32> = HashMap::new();
    for c in root.chars() {
        *available.entry(c).or_insert(0) += 1;
    }
    for c in candidate.chars() {
        match available.get_mut(&c) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MemoryStore, StaticDictionary};
    use crate::wordlist::WordPool;
    use crate::DEFAULT_LOCALE;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn silkworm_round() -> RoundState {
        let store = MemoryStore::default();
        let mut state = RoundState::new(&store);
        let mut rng = StdRng::seed_from_u64(1);
        state.start_round(&WordPool::parse("silkworm").unwrap(), &mut rng);
        state
    }

    fn validator(words: &[&str]) -> WordValidator<StaticDictionary> {
        WordValidator::new(StaticDictionary::new(words), DEFAULT_LOCALE)
    }

    #[test]
    fn test_accepts_feasible_recognized_unused_word() {
        let state = silkworm_round();
        let v = validator(&["worm"]);
        assert_eq!(v.evaluate("worm", &state).unwrap(), Some(Verdict::Accepted));
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let state = silkworm_round();
        let v = validator(&["worm"]);
        assert_eq!(
            v.evaluate("  WoRm \n", &state).unwrap(),
            Some(Verdict::Accepted)
        );
    }

    #[test]
    fn test_empty_after_trim_yields_no_verdict() {
        let state = silkworm_round();
        let v = validator(&["worm"]);
        assert_eq!(v.evaluate("", &state).unwrap(), None);
        assert_eq!(v.evaluate("   \t ", &state).unwrap(), None);
    }

    #[test]
    fn test_duplicate_after_commit() {
        let mut store = MemoryStore::default();
        let mut state = silkworm_round();
        let v = validator(&["worm"]);
        assert_eq!(v.evaluate("worm", &state).unwrap(), Some(Verdict::Accepted));
        state.commit("worm", &mut store).unwrap();
        assert_eq!(
            v.evaluate("worm", &state).unwrap(),
            Some(Verdict::RejectedDuplicate)
        );
    }

    #[test]
    fn test_infeasible_when_letter_absent() {
        let state = silkworm_round();
        let v = validator(&["wormy"]);
        assert_eq!(
            v.evaluate("wormy", &state).unwrap(),
            Some(Verdict::RejectedInfeasible)
        );
    }

    #[test]
    fn test_infeasible_when_multiplicity_exceeded() {
        // Only one "s" in "silkworm".
        let state = silkworm_round();
        let v = validator(&["silkworms"]);
        assert_eq!(
            v.evaluate("silkworms", &state).unwrap(),
            Some(Verdict::RejectedInfeasible)
        );
    }

    #[test]
    fn test_unrecognized_when_not_in_dictionary() {
        let state = silkworm_round();
        let v = validator(&[]);
        assert_eq!(
            v.evaluate("worm", &state).unwrap(),
            Some(Verdict::RejectedUnrecognized)
        );
    }

    #[test]
    fn test_duplicate_reported_before_later_checks() {
        let mut store = MemoryStore::default();
        let mut state = silkworm_round();
        state.commit("worm", &mut store).unwrap();
        // "worm" is both used and unrecognized by this dictionary: duplicate wins.
        let v = validator(&[]);
        assert_eq!(
            v.evaluate("worm", &state).unwrap(),
            Some(Verdict::RejectedDuplicate)
        );
    }

    #[test]
    fn test_infeasible_reported_before_recognition() {
        let state = silkworm_round();
        let v = validator(&[]);
        // Both infeasible and unrecognized: infeasible wins.
        assert_eq!(
            v.evaluate("zzz", &state).unwrap(),
            Some(Verdict::RejectedInfeasible)
        );
    }

    #[test]
    fn test_root_word_itself_is_allowed() {
        let state = silkworm_round();
        let v = validator(&["silkworm"]);
        assert_eq!(
            v.evaluate("silkworm", &state).unwrap(),
            Some(Verdict::Accepted)
        );
    }

    #[test]
    fn test_evaluate_requires_active_round() {
        let store = MemoryStore::default();
        let state = RoundState::new(&store);
        let v = validator(&["worm"]);
        assert!(matches!(
            v.evaluate("worm", &state),
            Err(RoundError::NotStarted)
        ));
    }

    #[test]
    fn test_validator_never_mutates_state() {
        let state = silkworm_round();
        let v = validator(&["worm"]);
        v.evaluate("worm", &state).unwrap();
        v.evaluate("zzz", &state).unwrap();
        assert!(state.used_words().is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_rejection_titles_and_messages() {
        assert_eq!(Verdict::Accepted.title(), None);
        assert_eq!(
            Verdict::RejectedDuplicate.title(),
            Some("Word used already")
        );
        assert_eq!(
            Verdict::RejectedInfeasible.message("silkworm").as_deref(),
            Some("You can't spell that word from 'silkworm'!")
        );
        assert_eq!(
            Verdict::RejectedUnrecognized.title(),
            Some("Word not recognized")
        );
    }

    proptest! {
        /// Feasibility is a multiset property: permuting the candidate's
        /// letters never changes the verdict.
        #[test]
        fn prop_feasibility_is_order_independent(
            root in "[a-z]{1,12}",
            candidate in "[a-z]{0,12}",
        ) {
            let forward = feasible(&candidate, &root);
            let reversed: String = candidate.chars().rev().collect();
            let mut sorted: Vec<char> = candidate.chars().collect();
            sorted.sort_unstable();
            let sorted: String = sorted.into_iter().collect();
            prop_assert_eq!(forward, feasible(&reversed, &root));
            prop_assert_eq!(forward, feasible(&sorted, &root));
        }

        /// Any prefix of the root's own letters is feasible.
        #[test]
        fn prop_root_prefixes_are_feasible(root in "[a-z]{1,12}", cut in 0usize..12) {
            let cut = cut.min(root.chars().count());
            let prefix: String = root.chars().take(cut).collect();
            prop_assert!(feasible(&prefix, &root));
        }

        /// Appending a letter beyond its remaining multiplicity is infeasible.
        #[test]
        fn prop_exceeding_multiplicity_is_infeasible(root in "[a-z]{1,12}") {
            let extra = root.chars().next().unwrap();
            let candidate = format!("{root}{extra}");
            prop_assert!(!feasible(&candidate, &root));
        }
    }
}
