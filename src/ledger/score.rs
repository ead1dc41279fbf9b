//! A single leaderboard row and its persisted JSON form.
//!
//! The stored layout is `{name, moves, time?, gameMode?, timeLimit?, date}`.
//! Rows written before the timer existed lack `time` and `gameMode`, and
//! some carry them as `null`; either way they read back as `0` seconds in
//! stopwatch mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::timer::TimerMode;

/// Result of one completed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name as entered (trimmed).
    #[serde(rename = "name")]
    pub player_name: String,

    /// Pairs evaluated. Primary ranking key, lower is better.
    #[serde(rename = "moves")]
    pub move_count: u32,

    /// Seconds on the timer. Breaks ties on `move_count`.
    #[serde(rename = "time", default, deserialize_with = "null_as_default")]
    pub elapsed_seconds: u32,

    /// Timer mode the round was played in.
    #[serde(rename = "gameMode", default, deserialize_with = "null_as_default")]
    pub mode: TimerMode,

    /// Countdown limit, if any.
    #[serde(rename = "timeLimit", default)]
    pub limit_seconds: Option<u32>,

    /// When the round was completed.
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl ScoreEntry {
    /// Create a stopwatch entry.
    #[must_use]
    pub fn new(
        player_name: impl Into<String>,
        move_count: u32,
        elapsed_seconds: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            move_count,
            elapsed_seconds,
            mode: TimerMode::Stopwatch,
            limit_seconds: None,
            timestamp,
        }
    }

    /// Set the timer mode and limit (builder pattern).
    #[must_use]
    pub fn with_mode(mut self, mode: TimerMode, limit_seconds: Option<u32>) -> Self {
        self.mode = mode;
        self.limit_seconds = limit_seconds;
        self
    }

    /// Ranking key: fewer moves first, then less time.
    #[must_use]
    pub fn rank_key(&self) -> (u32, u32) {
        (self.move_count, self.elapsed_seconds)
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_persisted_field_names() {
        let entry = ScoreEntry::new("Miron", 14, 62, date())
            .with_mode(TimerMode::Countdown, Some(120));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["name"], "Miron");
        assert_eq!(value["moves"], 14);
        assert_eq!(value["time"], 62);
        assert_eq!(value["gameMode"], "countdown");
        assert_eq!(value["timeLimit"], 120);
        assert_eq!(value["date"], "2024-03-15T14:30:00Z");
    }

    #[test]
    fn test_old_schema_defaults() {
        let json = r#"{"name":"Anna","moves":15,"date":"2024-03-15T14:30:00.000Z"}"#;
        let entry: ScoreEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.player_name, "Anna");
        assert_eq!(entry.move_count, 15);
        assert_eq!(entry.elapsed_seconds, 0);
        assert_eq!(entry.mode, TimerMode::Stopwatch);
        assert_eq!(entry.limit_seconds, None);
        assert_eq!(entry.timestamp, date());
    }

    #[test]
    fn test_null_time_limit() {
        let json = r#"{"name":"B","moves":3,"time":9,"gameMode":"stopwatch","timeLimit":null,"date":"2024-03-15T14:30:00Z"}"#;
        let entry: ScoreEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.limit_seconds, None);
        assert_eq!(entry.rank_key(), (3, 9));
    }
    #[test]
    fn test_null_time_and_mode_default() {
        let json = r#"{"name":"C","moves":7,"time":null,"gameMode":null,"date":"2024-03-15T14:30:00Z"}"#;
        let entry: ScoreEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.elapsed_seconds, 0);
        assert_eq!(entry.mode, TimerMode::Stopwatch);
        assert_eq!(entry.rank_key(), (7, 0));
    }
}
