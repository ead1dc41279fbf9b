//! # flag-match
//!
//! Core engine for a memory-matching game: pair each flag with its
//! country name in as few moves as possible.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: Deck setup, pair evaluation, timer ticks and
//!    ledger ranking are plain state changes, testable without a clock,
//!    a browser or storage.
//!
//! 2. **Injected collaborators**: Storage, wall clock and the tick driver
//!    belong to the host. The engine only sees traits and a virtual clock.
//!
//! 3. **Permissive input**: Invalid clicks are no-ops, never errors. Only
//!    round setup can fail.
//!
//! ## Modules
//!
//! - `core`: Configuration and deterministic RNG
//! - `catalog`: Countries (or any entries) grouped by continent
//! - `cards`: Cards and round setup
//! - `rules`: Match engine state machine
//! - `timer`: Stopwatch / countdown
//! - `ledger`: Persisted top-10 leaderboard
//! - `schedule`: Cancellable delayed transitions
//! - `session`: Intents in, projections out

pub mod core;
pub mod error;
pub mod catalog;
pub mod cards;
pub mod rules;
pub mod timer;
pub mod ledger;
pub mod schedule;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, LedgerConfig, RevealDelays};

pub use crate::error::{GameError, Result};

pub use crate::catalog::{Catalog, CatalogEntry, EntryId, GroupFilter};

pub use crate::cards::{create_round, Card, CardId, Face};

pub use crate::rules::{IgnoreReason, RoundPhase, RoundResult, RoundState, SelectOutcome};

pub use crate::timer::{TimerEvent, TimerMode, TimerSettings, TimerState};

pub use crate::ledger::{FileStorage, MemoryStorage, ScoreEntry, ScoreLedger, ScoreStorage};

pub use crate::schedule::{Scheduler, TaskId};

pub use crate::session::{CardView, Clock, FixedClock, RoundView, Session, SystemClock};
