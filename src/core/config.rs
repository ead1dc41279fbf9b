//! Session configuration.
//!
//! Loadable from TOML; every field has a default, so an empty document is a
//! valid configuration for the classic game (all twelve European
//! flags, stopwatch timer, 500ms/1000ms reveal windows, top-10 ledger).
//!
//! ```
//! use flag_match::core::GameConfig;
//! use flag_match::timer::TimerMode;
//!
//! let config = GameConfig::from_toml(r#"
//!     pair_count = 6
//!     group = "asia"
//!
//!     [timer]
//!     mode = "countdown"
//!     limit_seconds = 90
//! "#).unwrap();
//!
//! assert_eq!(config.pair_count, 6);
//! assert_eq!(config.timer.mode, TimerMode::Countdown);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::GroupFilter;
use crate::error::{GameError, Result};
use crate::timer::{TimerMode, TimerSettings};

/// How long selected cards stay face-up after a pair is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealDelays {
    /// Delay before a matched pair's selection clears.
    #[serde(default = "default_match_ms")]
    pub match_ms: u64,
    /// Delay before a mismatched pair flips back.
    #[serde(default = "default_mismatch_ms")]
    pub mismatch_ms: u64,
}

impl Default for RevealDelays {
    fn default() -> Self {
        Self {
            match_ms: default_match_ms(),
            mismatch_ms: default_mismatch_ms(),
        }
    }
}

/// Leaderboard settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Maximum entries kept after each write.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Key of the record in the host key-value store.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            storage_key: default_storage_key(),
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Pairs dealt per round.
    #[serde(default = "default_pair_count")]
    pub pair_count: usize,

    /// Which catalog group the deck is drawn from.
    #[serde(default)]
    pub group: GroupFilter,

    /// Stopwatch or countdown.
    #[serde(default)]
    pub timer: TimerSettings,

    /// Reveal windows after a pair is evaluated.
    #[serde(default)]
    pub reveal: RevealDelays,

    /// Timer tick interval in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Leaderboard capacity and storage key.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Player names longer than this are truncated.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// RNG seed. `None` draws one from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: default_pair_count(),
            group: GroupFilter::default(),
            timer: TimerSettings::default(),
            reveal: RevealDelays::default(),
            tick_ms: default_tick_ms(),
            ledger: LedgerConfig::default(),
            max_name_len: default_max_name_len(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `GameError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns `GameError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.pair_count == 0 {
            return Err(GameError::Config("pair_count must be at least 1".into()));
        }
        if self.tick_ms == 0 {
            return Err(GameError::Config("tick_ms must be positive".into()));
        }
        if self.ledger.capacity == 0 {
            return Err(GameError::Config("ledger.capacity must be at least 1".into()));
        }
        if self.max_name_len == 0 {
            return Err(GameError::Config("max_name_len must be at least 1".into()));
        }
        if self.timer.mode == TimerMode::Countdown && self.timer.limit_seconds.unwrap_or(0) == 0 {
            return Err(GameError::Config(
                "timer.limit_seconds must be positive in countdown mode".into(),
            ));
        }
        Ok(())
    }

    /// Set the pair count.
    #[must_use]
    pub fn with_pair_count(mut self, pair_count: usize) -> Self {
        self.pair_count = pair_count;
        self
    }

    /// Set the group filter.
    #[must_use]
    pub fn with_group(mut self, group: GroupFilter) -> Self {
        self.group = group;
        self
    }

    /// Set the timer settings.
    #[must_use]
    pub fn with_timer(mut self, timer: TimerSettings) -> Self {
        self.timer = timer;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn default_pair_count() -> usize {
    12
}

fn default_match_ms() -> u64 {
    500
}

fn default_mismatch_ms() -> u64 {
    1000
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_capacity() -> usize {
    10
}

fn default_storage_key() -> String {
    "flagGameScores".to_string()
}

fn default_max_name_len() -> usize {
    20
}
