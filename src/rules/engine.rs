//! Match engine: card selection, pair evaluation and completion.
//!
//! ## Phases
//!
//! - `Idle`: nothing selected
//! - `OneSelected`: one card face-up, waiting for the second
//! - `Evaluating`: two cards face-up, waiting for the un-reveal
//! - `Complete`: every pair found
//! - `TimedOut`: the countdown ran out first
//!
//! Evaluation is synchronous. When the second card is picked the move is
//! counted and a matching pair is marked at once; only the visual un-reveal
//! (`clear_selection`) is deferred, and that is the scheduler's concern.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::cards::{create_round, Card, CardId};
use crate::catalog::{Catalog, EntryId, GroupFilter};
use crate::core::GameRng;
use crate::error::Result;

/// Where a round currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No card selected.
    Idle,
    /// One card selected.
    OneSelected,
    /// Two cards selected, pending un-reveal.
    Evaluating,
    /// All pairs matched.
    Complete,
    /// Timer expired before completion.
    TimedOut,
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// No round has been dealt.
    NoRound,
    /// The round is already complete.
    RoundComplete,
    /// The timer expired.
    RoundOver,
    /// No card with that id in this round.
    UnknownCard,
    /// The card (or its entry) is already matched.
    AlreadyMatched,
    /// The card is already face-up in the current selection.
    AlreadySelected,
    /// Two cards are face-up; wait for the un-reveal.
    SelectionFull,
}

/// Result of `select_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair turned face-up.
    Selected,
    /// Second card completed a pair.
    Matched {
        /// Entry that was paired.
        entry_id: EntryId,
        /// Was this the last pair?
        round_complete: bool,
    },
    /// Second card did not pair with the first.
    Mismatched,
}

impl SelectOutcome {
    /// Was the selection a no-op?
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, SelectOutcome::Ignored(_))
    }

    /// Did this selection evaluate a pair (counting a move)?
    #[must_use]
    pub fn is_evaluation(&self) -> bool {
        matches!(self, SelectOutcome::Matched { .. } | SelectOutcome::Mismatched)
    }
}

/// State of one round.
///
/// Uses `im` persistent structures so views can be cloned cheaply.
///
/// ## Invariants
///
/// - `selected` never holds more than two cards
/// - an entry id is in `completed` at most once
/// - a card whose entry is completed is always revealed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    cards: Vector<Card>,
    selected: SmallVec<[CardId; 2]>,
    completed: ImHashSet<EntryId>,
    move_count: u32,
    pair_count: usize,
    ended: bool,
    recorded: bool,
}

impl RoundState {
    /// Start a round from a dealt deck.
    ///
    /// The deck is expected to hold two cards per entry, as `create_round` deals.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        let pair_count = cards.len() / 2;
        Self {
            cards: cards.into_iter().collect(),
            selected: SmallVec::new(),
            completed: ImHashSet::new(),
            move_count: 0,
            pair_count,
            ended: false,
            recorded: false,
        }
    }

    /// Deal a fresh deck and start a round on it.
    ///
    /// # Errors
    /// Propagates round setup errors; no round is created.
    pub fn deal(
        catalog: &Catalog,
        filter: &GroupFilter,
        pair_count: usize,
        rng: &mut GameRng,
    ) -> Result<Self> {
        Ok(Self::new(create_round(catalog, filter, pair_count, rng)?))
    }

    // === Transitions ===

    /// Turn a card face-up.
    ///
    /// Invalid selections are silent no-ops reported as `Ignored`.
    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        if self.is_complete() {
            return SelectOutcome::Ignored(IgnoreReason::RoundComplete);
        }
        if self.ended {
            return SelectOutcome::Ignored(IgnoreReason::RoundOver);
        }
        let Some(index) = self.index_of(id) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownCard);
        };
        let card = &self.cards[index];
        if card.matched || self.completed.contains(&card.entry_id) {
            return SelectOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if self.selected.contains(&id) {
            return SelectOutcome::Ignored(IgnoreReason::AlreadySelected);
        }
        if self.selected.len() >= 2 {
            return SelectOutcome::Ignored(IgnoreReason::SelectionFull);
        }

        self.selected.push(id);
        if self.selected.len() < 2 {
            return SelectOutcome::Selected;
        }

        self.move_count += 1;
        self.evaluate()
    }

    fn evaluate(&mut self) -> SelectOutcome {
        let (Some(first), Some(second)) = (
            self.index_of(self.selected[0]),
            self.index_of(self.selected[1]),
        ) else {
            return SelectOutcome::Mismatched;
        };

        if !self.cards[first].pairs_with(&self.cards[second]) {
            debug!(moves = self.move_count, "No match");
            return SelectOutcome::Mismatched;
        }

        let entry_id = self.cards[first].entry_id.clone();
        self.completed.insert(entry_id.clone());
        for index in [first, second] {
            if let Some(card) = self.cards.get_mut(index) {
                card.matched = true;
            }
        }

        let round_complete = self.is_complete();
        debug!(entry = %entry_id, moves = self.move_count, "Matched pair");
        if round_complete {
            info!(moves = self.move_count, pairs = self.pair_count, "Round complete");
        }

        SelectOutcome::Matched {
            entry_id,
            round_complete,
        }
    }

    /// Flip the current selection back face-down (matched cards stay revealed).
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// End the round because the timer ran out.
    ///
    /// A pending selection is discarded; moves and matched entries are kept.
    /// Returns `false` if the round was already complete or ended.
    pub fn expire(&mut self) -> bool {
        if self.is_complete() || self.ended {
            return false;
        }
        self.ended = true;
        self.selected.clear();
        info!(
            moves = self.move_count,
            matched = self.completed.len(),
            pairs = self.pair_count,
            "Round timed out"
        );
        true
    }

    /// Claim the single ledger write for this round.
    ///
    /// Returns `true` exactly once, and only for a completed round.
    pub fn mark_recorded(&mut self) -> bool {
        if !self.is_complete() || self.recorded {
            return false;
        }
        self.recorded = true;
        true
    }

    // === Queries ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        if self.is_complete() {
            RoundPhase::Complete
        } else if self.ended {
            RoundPhase::TimedOut
        } else {
            match self.selected.len() {
                0 => RoundPhase::Idle,
                1 => RoundPhase::OneSelected,
                _ => RoundPhase::Evaluating,
            }
        }
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed.len() == self.pair_count
    }

    /// Did the timer end the round?
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Should this card be shown face-up?
    #[must_use]
    pub fn is_revealed(&self, id: CardId) -> bool {
        if self.selected.contains(&id) {
            return true;
        }
        self.card(id)
            .is_some_and(|card| self.completed.contains(&card.entry_id))
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index_of(id).map(|i| &self.cards[i])
    }

    /// Cards in board order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Currently selected card ids, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    /// Entries paired so far.
    #[must_use]
    pub fn completed_entry_ids(&self) -> &ImHashSet<EntryId> {
        &self.completed
    }

    /// Number of pairs evaluated.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Number of pairs found.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.completed.len()
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }
}
