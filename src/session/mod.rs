//! Game session: the boundary between the renderer and the engine.
//!
//! The renderer sends intents (`start_round`, `select_card`, `reset_round`,
//! `clear_ledger`), drives time with `advance`, and draws `view()`.
//! Everything runs on one thread; a call runs to completion before the
//! next one starts.
//!
//! ## Delayed work
//!
//! The un-reveal after a pair is shown and the timer tick are tasks on a
//! virtual-clock [`Scheduler`]. Starting or resetting a round cancels every
//! pending task, and each task carries the round number it belongs to, so a
//! stale callback can never touch a newer round.
//!
//! ## Example
//!
//! ```
//! use flag_match::catalog::Catalog;
//! use flag_match::core::GameConfig;
//! use flag_match::ledger::MemoryStorage;
//! use flag_match::session::Session;
//!
//! let config = GameConfig::default().with_pair_count(4).with_seed(7);
//! let mut session = Session::new(config, Catalog::countries(), MemoryStorage::new()).unwrap();
//!
//! session.start_round("Miron").unwrap();
//! let view = session.view().unwrap();
//! assert_eq!(view.cards.len(), 8);
//!
//! session.advance(3_000);
//! assert_eq!(session.timer().elapsed_seconds(), 3);
//! ```

mod clock;
mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use view::{CardView, RoundView};

use tracing::{debug, info, warn};

use crate::cards::CardId;
use crate::catalog::{Catalog, GroupFilter};
use crate::core::{GameConfig, GameRng};
use crate::error::{GameError, Result};
use crate::ledger::{ScoreEntry, ScoreLedger, ScoreStorage};
use crate::rules::{IgnoreReason, RoundResult, RoundState, SelectOutcome};
use crate::schedule::{Due, Scheduler, TaskId};
use crate::timer::{TimerEvent, TimerSettings, TimerState};

/// Delayed transitions owned by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    /// One timer interval elapsed.
    Tick { round: u64 },
    /// Flip the evaluated pair back face-down.
    Hide { round: u64 },
}

/// A player's session: one round at a time plus the shared ledger.
pub struct Session {
    config: GameConfig,
    catalog: Catalog,
    storage: Box<dyn ScoreStorage>,
    clock: Box<dyn Clock>,
    rng: GameRng,
    scheduler: Scheduler<Task>,
    timer: TimerState,
    round: Option<RoundState>,
    round_number: u64,
    player_name: Option<String>,
    tick_task: Option<TaskId>,
    hide_task: Option<TaskId>,
    last_result: Option<RoundResult>,
    last_rank: Option<usize>,
}

impl Session {
    /// Create a session.
    ///
    /// # Errors
    /// Returns `GameError::Config` if the configuration is invalid.
    pub fn new(
        config: GameConfig,
        catalog: Catalog,
        storage: impl ScoreStorage + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let timer = TimerState::from_settings(&config.timer)?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!(seed = rng.seed(), "Session created");

        Ok(Self {
            config,
            catalog,
            storage: Box::new(storage),
            clock: Box::new(SystemClock),
            rng,
            scheduler: Scheduler::new(),
            timer,
            round: None,
            round_number: 0,
            player_name: None,
            tick_task: None,
            hide_task: None,
            last_result: None,
            last_rank: None,
        })
    }

    /// Replace the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // === Intents ===

    /// Deal a new round for `player_name` and start the timer.
    ///
    /// The name is trimmed and cut to `max_name_len` characters. On error
    /// the current round, timer and pending tasks are left untouched.
    ///
    /// # Errors
    /// - `GameError::InvalidPlayerName` for an empty or blank name.
    /// - `GameError::InsufficientEntries` if the group is too small.
    pub fn start_round(&mut self, player_name: &str) -> Result<()> {
        let name = normalize_name(player_name, self.config.max_name_len)?;
        let mut timer = TimerState::from_settings(&self.config.timer)?;

        let mut rng = self.rng.clone();
        let round = RoundState::deal(
            &self.catalog,
            &self.config.group,
            self.config.pair_count,
            &mut rng,
        )?;

        self.cancel_pending();
        self.rng = rng;
        self.round_number += 1;
        self.round = Some(round);
        self.last_result = None;
        self.last_rank = None;

        timer.start();
        self.timer = timer;
        self.schedule_tick();

        info!(
            player = %name,
            round = self.round_number,
            group = %self.config.group,
            pairs = self.config.pair_count,
            mode = %self.timer.mode(),
            "Round started"
        );
        self.player_name = Some(name);
        Ok(())
    }

    /// Deal a new round for the current player.
    ///
    /// # Errors
    /// `GameError::InvalidPlayerName` if no round was ever started, otherwise
    /// as [`start_round`](Self::start_round).
    pub fn restart(&mut self) -> Result<()> {
        let name = self.player_name.clone().ok_or(GameError::InvalidPlayerName)?;
        self.start_round(&name)
    }

    /// Abandon the current round and return to name entry.
    ///
    /// The last player name is kept so the renderer can prefill it.
    pub fn reset_round(&mut self) {
        let cancelled = self.cancel_pending();
        self.round = None;
        self.timer.reset();
        self.last_result = None;
        self.last_rank = None;
        debug!(cancelled, "Round reset");
    }

    /// Turn a card face-up.
    ///
    /// Invalid clicks are ignored. A completed round writes its score once.
    pub fn select_card(&mut self, card_id: CardId) -> SelectOutcome {
        let outcome = match self.round.as_mut() {
            Some(round) => round.select_card(card_id),
            None => return SelectOutcome::Ignored(IgnoreReason::NoRound),
        };

        match &outcome {
            SelectOutcome::Matched { round_complete, .. } => {
                self.schedule_hide(self.config.reveal.match_ms);
                if *round_complete {
                    self.finish_round();
                }
            }
            SelectOutcome::Mismatched => {
                self.schedule_hide(self.config.reveal.mismatch_ms);
            }
            SelectOutcome::Selected | SelectOutcome::Ignored(_) => {}
        }

        outcome
    }

    /// Move the virtual clock forward, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(ms);
        while let Some(due) = self.scheduler.pop_due(target) {
            self.run(due);
        }
        self.scheduler.set_now(target);
    }

    /// Change the timer for the next round.
    ///
    /// # Errors
    /// `GameError::Config` for a countdown without a positive limit.
    pub fn set_timer(&mut self, settings: TimerSettings) -> Result<()> {
        TimerState::from_settings(&settings)?;
        self.config.timer = settings;
        Ok(())
    }

    /// Change the group and pair count for the next round.
    ///
    /// Whether the group holds enough entries is checked when the round is dealt.
    ///
    /// # Errors
    /// `GameError::Config` if `pair_count` is zero.
    pub fn set_deck(&mut self, group: GroupFilter, pair_count: usize) -> Result<()> {
        if pair_count == 0 {
            return Err(GameError::Config("pair_count must be at least 1".into()));
        }
        self.config.group = group;
        self.config.pair_count = pair_count;
        Ok(())
    }

    // === Ledger ===

    /// Read the leaderboard from storage.
    #[must_use]
    pub fn leaderboard(&self) -> ScoreLedger {
        ScoreLedger::load(
            self.storage.as_ref(),
            &self.config.ledger.storage_key,
            self.config.ledger.capacity,
        )
    }

    /// Erase the leaderboard. The caller confirms with the player first.
    ///
    /// # Errors
    /// Propagates storage errors.
    pub fn clear_ledger(&mut self) -> Result<()> {
        self.storage.remove(&self.config.ledger.storage_key)?;
        info!(key = %self.config.ledger.storage_key, "Ledger cleared");
        Ok(())
    }

    // === Queries ===

    /// Projection of the current round, `None` before the first deal or after a reset.
    #[must_use]
    pub fn view(&self) -> Option<RoundView> {
        let round = self.round.as_ref()?;
        let name = self.player_name.as_deref().unwrap_or_default();
        Some(RoundView::build(name, round, &self.timer))
    }

    /// Current round state.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Current timer state.
    #[must_use]
    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    /// Name of the last player to start a round.
    #[must_use]
    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    /// How the current round ended, if it has.
    #[must_use]
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    /// Leaderboard rank of the current round's score, if it placed.
    #[must_use]
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The catalog decks are dealt from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Number of delayed tasks waiting to run.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // === Internals ===

    fn run(&mut self, due: Due<Task>) {
        match due.task {
            Task::Tick { round } if round == self.round_number => {
                self.tick_task = None;
                match self.timer.tick() {
                    TimerEvent::Ticked => self.schedule_tick(),
                    TimerEvent::Expired => self.on_timer_expired(),
                    TimerEvent::Idle => {}
                }
            }
            Task::Hide { round } if round == self.round_number => {
                self.hide_task = None;
                if let Some(state) = self.round.as_mut() {
                    state.clear_selection();
                }
            }
            stale => debug!(task = ?stale, id = %due.id, "Dropping stale task"),
        }
    }

    fn on_timer_expired(&mut self) {
        if let Some(id) = self.hide_task.take() {
            self.scheduler.cancel(id);
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.expire() {
            self.last_result = Some(RoundResult::TimedOut {
                matched_pairs: round.matched_pairs(),
            });
        }
    }

    fn finish_round(&mut self) {
        self.timer.stop();
        if let Some(id) = self.tick_task.take() {
            self.scheduler.cancel(id);
        }

        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.mark_recorded() {
            return;
        }
        let moves = round.move_count();
        let elapsed = self.timer.elapsed_seconds();
        self.last_result = Some(RoundResult::Completed {
            moves,
            elapsed_seconds: elapsed,
        });

        let name = self.player_name.clone().unwrap_or_default();
        let entry = ScoreEntry::new(&name, moves, elapsed, self.clock.now())
            .with_mode(self.timer.mode(), self.timer.limit_seconds());

        let key = &self.config.ledger.storage_key;
        let mut ledger = ScoreLedger::load(self.storage.as_ref(), key, self.config.ledger.capacity);
        let rank = ledger.record(entry);
        self.last_rank = rank;

        if let Err(e) = ledger.save(self.storage.as_mut(), key) {
            warn!(error = %e, "Could not save score");
        }
        info!(player = %name, moves, elapsed, rank = ?rank, "Score recorded");
    }

    fn schedule_tick(&mut self) {
        let task = Task::Tick {
            round: self.round_number,
        };
        self.tick_task = Some(self.scheduler.schedule(self.config.tick_ms, task));
    }

    fn schedule_hide(&mut self, delay_ms: u64) {
        if let Some(id) = self.hide_task.take() {
            self.scheduler.cancel(id);
        }
        let task = Task::Hide {
            round: self.round_number,
        };
        self.hide_task = Some(self.scheduler.schedule(delay_ms, task));
    }

    fn cancel_pending(&mut self) -> usize {
        self.tick_task = None;
        self.hide_task = None;
        self.scheduler.cancel_all()
    }
}

fn normalize_name(raw: &str, max_len: usize) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GameError::InvalidPlayerName);
    }
    Ok(trimmed.chars().take(max_len).collect())
}
