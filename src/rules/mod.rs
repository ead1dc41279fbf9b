//! Match rules for a round.
//!
//! `RoundState` is the state machine; `RoundResult` is what a finished
//! round reports.

mod engine;

pub use engine::{IgnoreReason, RoundPhase, RoundState, SelectOutcome};

/// Result of a finished round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundResult {
    /// Every pair found.
    Completed {
        /// Pairs evaluated.
        moves: u32,
        /// Seconds on the timer when the last pair matched.
        elapsed_seconds: u32,
    },
    /// Countdown ran out.
    TimedOut {
        /// Pairs found before time ran out.
        matched_pairs: usize,
    },
}

impl RoundResult {
    /// Did the player clear the board?
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, RoundResult::Completed { .. })
    }
}
