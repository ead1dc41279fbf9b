//! Formatting helpers for leaderboard rows.

use chrono::{DateTime, TimeZone};

use crate::timer::TimerMode;

/// `m:ss` clock text.
///
/// ```
/// use flag_match::ledger::format_clock;
///
/// assert_eq!(format_clock(0), "0:00");
/// assert_eq!(format_clock(65), "1:05");
/// ```
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Medal for the podium, `"N."` below it. `index` is 0-based.
#[must_use]
pub fn rank_label(index: usize) -> String {
    match index {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("{}.", n + 1),
    }
}

/// Icon for the timer mode a score was set in.
#[must_use]
pub fn mode_icon(mode: TimerMode) -> &'static str {
    match mode {
        TimerMode::Countdown => "⏳",
        TimerMode::Stopwatch => "⏱️",
    }
}

/// `YYYY. MM. DD. HH:MM`, the Hungarian short date-time layout.
#[must_use]
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y. %m. %d. %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn test_rank_label() {
        assert_eq!(rank_label(0), "🥇");
        assert_eq!(rank_label(1), "🥈");
        assert_eq!(rank_label(2), "🥉");
        assert_eq!(rank_label(3), "4.");
        assert_eq!(rank_label(9), "10.");
    }

    #[test]
    fn test_mode_icon() {
        assert_eq!(mode_icon(TimerMode::Countdown), "⏳");
        assert_eq!(mode_icon(TimerMode::Stopwatch), "⏱️");
    }

    #[test]
    fn test_format_date() {
        let utc = Utc.with_ymd_and_hms(2024, 3, 5, 7, 4, 0).unwrap();
        assert_eq!(format_date(&utc), "2024. 03. 05. 07:04");

        let budapest = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(format_date(&utc.with_timezone(&budapest)), "2024. 03. 05. 08:04");
    }
}
