//! Score ledger: the persisted top-N leaderboard.
//!
//! ## Key Types
//!
//! - `ScoreEntry`: One completed round, in the persisted JSON layout
//! - `ScoreLedger`: Ranked, bounded list with load/save
//! - `ScoreStorage`: Host key-value store (`MemoryStorage`, `FileStorage`)
//!
//! Loading never fails: missing or corrupt data is an empty ledger.
//! Saving replaces the whole record in one write.

pub mod board;
pub mod display;
pub mod score;
pub mod storage;

pub use board::{ScoreLedger, DEFAULT_CAPACITY};
pub use display::{format_clock, format_date, mode_icon, rank_label};
pub use score::ScoreEntry;
pub use storage::{FileStorage, MemoryStorage, ScoreStorage};
