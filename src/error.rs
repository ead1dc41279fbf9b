//! Error types for the flag-match engine.
//!
//! Only setup-time failures are errors. Invalid input to the match engine
//! (stale card ids, clicks after completion) is a silent no-op.

use thiserror::Error;

/// Top-level error type for all engine operations.
#[derive(Error, Debug)]
pub enum GameError {
    /// The filtered catalog holds fewer entries than the requested pair count.
    #[error("Not enough catalog entries in {group}: requested {requested}, available {available}")]
    InsufficientEntries {
        /// Group filter that was applied.
        group: String,
        /// Pairs requested.
        requested: usize,
        /// Entries left after filtering.
        available: usize,
    },

    /// Player name was empty or whitespace only.
    #[error("Player name must not be empty")]
    InvalidPlayerName,

    /// Persisted ledger data could not be parsed.
    ///
    /// Recovered locally by treating the ledger as empty.
    #[error("Persisted ledger is corrupt: {0}")]
    PersistedStateCorrupt(String),

    /// Two catalog entries share an id.
    #[error("Duplicate catalog entry: {0}")]
    DuplicateEntry(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization failure while writing persisted state.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, GameError>;
