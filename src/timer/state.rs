//! Timer state and its transitions.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Counting direction of the round timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Counts up, never expires.
    #[default]
    Stopwatch,
    /// Counts up to a limit, then expires the round.
    Countdown,
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerMode::Stopwatch => f.write_str("stopwatch"),
            TimerMode::Countdown => f.write_str("countdown"),
        }
    }
}

/// Serializable timer settings (the config form of `TimerState`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Stopwatch or countdown.
    #[serde(default)]
    pub mode: TimerMode,
    /// Seconds allowed in countdown mode. Ignored for stopwatch.
    #[serde(default)]
    pub limit_seconds: Option<u32>,
}

impl TimerSettings {
    /// Stopwatch settings.
    #[must_use]
    pub const fn stopwatch() -> Self {
        Self {
            mode: TimerMode::Stopwatch,
            limit_seconds: None,
        }
    }

    /// Countdown settings with the given limit.
    #[must_use]
    pub const fn countdown(limit_seconds: u32) -> Self {
        Self {
            mode: TimerMode::Countdown,
            limit_seconds: Some(limit_seconds),
        }
    }
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Timer is not running; nothing changed.
    Idle,
    /// One second counted.
    Ticked,
    /// Countdown reached its limit on this tick. Fires once per run.
    Expired,
}

/// Round timer.
///
/// Pure state: a scheduler outside this type calls [`tick`](Self::tick)
/// once per interval while the timer is running.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    mode: TimerMode,
    limit_seconds: Option<u32>,
    elapsed_seconds: u32,
    running: bool,
    expired: bool,
}

impl TimerState {
    /// A stopped stopwatch at zero.
    #[must_use]
    pub fn stopwatch() -> Self {
        Self {
            mode: TimerMode::Stopwatch,
            limit_seconds: None,
            elapsed_seconds: 0,
            running: false,
            expired: false,
        }
    }

    /// A stopped countdown at zero.
    ///
    /// # Errors
    /// Returns `GameError::Config` if `limit_seconds` is zero.
    pub fn countdown(limit_seconds: u32) -> Result<Self> {
        if limit_seconds == 0 {
            return Err(GameError::Config("countdown limit must be positive".into()));
        }
        Ok(Self {
            mode: TimerMode::Countdown,
            limit_seconds: Some(limit_seconds),
            elapsed_seconds: 0,
            running: false,
            expired: false,
        })
    }

    /// Build a timer from settings.
    ///
    /// # Errors
    /// Returns `GameError::Config` for a countdown without a positive limit.
    pub fn from_settings(settings: &TimerSettings) -> Result<Self> {
        match settings.mode {
            TimerMode::Stopwatch => Ok(Self::stopwatch()),
            TimerMode::Countdown => Self::countdown(settings.limit_seconds.unwrap_or(0)),
        }
    }

    /// Advance by one interval.
    pub fn tick(&mut self) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }

        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);

        match (self.mode, self.limit_seconds) {
            (TimerMode::Countdown, Some(limit)) if self.elapsed_seconds >= limit => {
                self.elapsed_seconds = limit;
                self.running = false;
                self.expired = true;
                TimerEvent::Expired
            }
            _ => TimerEvent::Ticked,
        }
    }

    /// Start (or resume) counting. No effect once expired.
    pub fn start(&mut self) {
        if !self.expired {
            self.running = true;
        }
    }

    /// Pause counting.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop, zero the count and clear expiry.
    pub fn reset(&mut self) {
        self.running = false;
        self.expired = false;
        self.elapsed_seconds = 0;
    }

    /// Counting direction.
    #[must_use]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Countdown limit, `None` for stopwatch.
    #[must_use]
    pub fn limit_seconds(&self) -> Option<u32> {
        self.limit_seconds
    }

    /// Seconds counted so far.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Is the timer counting?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Did the countdown run out?
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Seconds left on a countdown, floored at zero.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.limit_seconds
            .filter(|_| self.mode == TimerMode::Countdown)
            .map(|limit| limit.saturating_sub(self.elapsed_seconds))
    }

    /// Settings this timer was built from.
    #[must_use]
    pub fn settings(&self) -> TimerSettings {
        TimerSettings {
            mode: self.mode,
            limit_seconds: self.limit_seconds,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::stopwatch()
    }
}
