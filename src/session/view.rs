//! Read-only projections handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Face};
use crate::catalog::EntryId;
use crate::rules::{RoundPhase, RoundState};
use crate::timer::{TimerMode, TimerState};

/// One board slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    /// Key for the flag image lookup.
    pub entry_id: EntryId,
    pub display_name: String,
    pub face: Face,
    /// Draw face-up?
    pub revealed: bool,
    pub matched: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundView {
    pub player_name: String,
    pub cards: Vec<CardView>,
    pub move_count: u32,
    pub matched_pairs: usize,
    pub pair_count: usize,
    pub phase: RoundPhase,
    pub timer_mode: TimerMode,
    pub elapsed_seconds: u32,
    /// Countdown only.
    pub remaining_seconds: Option<u32>,
}

impl RoundView {
    pub(crate) fn build(player_name: &str, round: &RoundState, timer: &TimerState) -> Self {
        let cards = round
            .cards()
            .map(|card| CardView {
                id: card.id,
                entry_id: card.entry_id.clone(),
                display_name: card.display_name.clone(),
                face: card.face,
                revealed: round.is_revealed(card.id),
                matched: card.matched,
            })
            .collect();

        Self {
            player_name: player_name.to_string(),
            cards,
            move_count: round.move_count(),
            matched_pairs: round.matched_pairs(),
            pair_count: round.pair_count(),
            phase: round.phase(),
            timer_mode: timer.mode(),
            elapsed_seconds: timer.elapsed_seconds(),
            remaining_seconds: timer.remaining_seconds(),
        }
    }

    /// Ids of cards currently face-up.
    #[must_use]
    pub fn revealed_ids(&self) -> Vec<CardId> {
        self.cards.iter().filter(|c| c.revealed).map(|c| c.id).collect()
    }
}
