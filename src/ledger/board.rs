//! Ranked, bounded score history.

use tracing::{debug, info, warn};

use super::score::ScoreEntry;
use super::storage::ScoreStorage;
use crate::error::{GameError, Result};

/// Entries kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 10;

/// Top-N leaderboard.
///
/// Always sorted ascending by `(move_count, elapsed_seconds)` and never
/// longer than its capacity. Rows that tie on both keys keep insertion
/// order, so an earlier result stays ahead of a later equal one.
///
/// ```
/// use chrono::Utc;
/// use flag_match::ledger::{ScoreEntry, ScoreLedger};
///
/// let mut ledger = ScoreLedger::new(10);
/// ledger.record(ScoreEntry::new("a", 10, 30, Utc::now()));
/// ledger.record(ScoreEntry::new("b", 8, 50, Utc::now()));
/// ledger.record(ScoreEntry::new("c", 8, 20, Utc::now()));
///
/// let order: Vec<_> = ledger.iter().map(|e| e.rank_key()).collect();
/// assert_eq!(order, vec![(8, 20), (8, 50), (10, 30)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreLedger {
    entries: Vec<ScoreEntry>,
    capacity: usize,
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ScoreLedger {
    /// Create an empty ledger. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Build a ledger from arbitrary rows, sorting and truncating them.
    #[must_use]
    pub fn from_entries(entries: Vec<ScoreEntry>, capacity: usize) -> Self {
        let mut ledger = Self::new(capacity);
        ledger.entries = entries;
        ledger.normalize();
        ledger
    }

    /// Add a result, re-rank and drop anything past capacity.
    ///
    /// Returns the 0-based rank of the new entry, or `None` if it did not
    /// make the cut.
    pub fn record(&mut self, entry: ScoreEntry) -> Option<usize> {
        let key = entry.rank_key();
        self.entries.push(entry);
        // The new row sorts after every existing row with an equal key.
        let rank = self.entries[..self.entries.len() - 1]
            .iter()
            .filter(|e| e.rank_key() <= key)
            .count();
        self.normalize();
        (rank < self.capacity).then_some(rank)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, best first.
    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Iterate entries, best first.
    pub fn iter(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter()
    }

    /// Best entry.
    #[must_use]
    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries.first()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the ledger empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // === Persistence ===

    /// Parse a persisted JSON array.
    ///
    /// # Errors
    /// Returns `GameError::PersistedStateCorrupt` if the text is not a valid ledger.
    pub fn from_json(json: &str, capacity: usize) -> Result<Self> {
        let entries: Vec<ScoreEntry> = serde_json::from_str(json)
            .map_err(|e| GameError::PersistedStateCorrupt(e.to_string()))?;
        Ok(Self::from_entries(entries, capacity))
    }

    /// Serialize to the persisted JSON array.
    ///
    /// # Errors
    /// Returns `GameError::Serialization` on encoder failure.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Load from storage.
    ///
    /// Missing, unreadable or corrupt data yields an empty ledger; the
    /// problem is logged and never returned.
    #[must_use]
    pub fn load(storage: &dyn ScoreStorage, key: &str, capacity: usize) -> Self {
        let raw = match storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "No stored ledger");
                return Self::new(capacity);
            }
            Err(e) => {
                warn!(key, error = %e, "Could not read ledger, starting empty");
                return Self::new(capacity);
            }
        };

        match Self::from_json(&raw, capacity) {
            Ok(ledger) => {
                debug!(key, entries = ledger.len(), "Loaded ledger");
                ledger
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupt ledger");
                Self::new(capacity)
            }
        }
    }

    /// Replace the stored record with this ledger.
    ///
    /// # Errors
    /// Propagates serialization and storage errors.
    pub fn save(&self, storage: &mut dyn ScoreStorage, key: &str) -> Result<()> {
        storage.write(key, &self.to_json()?)?;
        info!(key, entries = self.len(), "Saved ledger");
        Ok(())
    }

    fn normalize(&mut self) {
        self.entries.sort_by_key(ScoreEntry::rank_key);
        self.entries.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryStorage;
    use crate::timer::TimerMode;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, moves: u32, time: u32) -> ScoreEntry {
        ScoreEntry::new(name, moves, time, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_ranking_order() {
        let mut ledger = ScoreLedger::default();
        ledger.record(entry("a", 10, 30));
        ledger.record(entry("b", 8, 50));
        ledger.record(entry("c", 8, 20));

        let names: Vec<_> = ledger.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert_eq!(ledger.best().unwrap().player_name, "c");
    }

    #[test]
    fn test_record_returns_rank() {
        let mut ledger = ScoreLedger::new(3);
        assert_eq!(ledger.record(entry("a", 10, 10)), Some(0));
        assert_eq!(ledger.record(entry("b", 5, 10)), Some(0));
        assert_eq!(ledger.record(entry("c", 10, 10)), Some(2));
        assert_eq!(ledger.record(entry("d", 20, 0)), None);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut ledger = ScoreLedger::default();
        ledger.record(entry("first", 12, 40));
        ledger.record(entry("second", 12, 40));

        let names: Vec<_> = ledger.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_capacity_bound() {
        let mut ledger = ScoreLedger::default();
        for i in 0..25u32 {
            ledger.record(entry("p", 30 - i, 0));
            assert!(ledger.len() <= DEFAULT_CAPACITY);
        }
        assert_eq!(ledger.len(), 10);
        assert_eq!(ledger.best().unwrap().move_count, 6);
        assert_eq!(ledger.entries().last().unwrap().move_count, 15);
    }

    #[test]
    fn test_clear() {
        let mut ledger = ScoreLedger::default();
        ledger.record(entry("a", 1, 1));
        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_zero_capacity_raised() {
        assert_eq!(ScoreLedger::new(0).capacity(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut ledger = ScoreLedger::default();
        ledger.record(entry("a", 9, 12).with_mode(TimerMode::Countdown, Some(60)));
        ledger.record(entry("b", 7, 40));

        ledger.save(&mut storage, "scores").unwrap();
        let loaded = ScoreLedger::load(&storage, "scores", DEFAULT_CAPACITY);
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = MemoryStorage::new();
        assert!(ScoreLedger::load(&storage, "scores", 10).is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        for raw in ["not json", "{\"name\":\"x\"}", "[{\"moves\":\"many\"}]", ""] {
            let storage = MemoryStorage::new().with_record("scores", raw);
            assert!(ScoreLedger::load(&storage, "scores", 10).is_empty(), "{raw}");
        }
    }

    #[test]
    fn test_from_json_reports_corruption() {
        let err = ScoreLedger::from_json("[oops", 10).unwrap_err();
        assert!(matches!(err, GameError::PersistedStateCorrupt(_)));
    }

    #[test]
    fn test_load_normalizes_unsorted_data() {
        let raw = r#"[
            {"name":"slow","moves":20,"date":"2024-01-01T00:00:00Z"},
            {"name":"fast","moves":10,"time":5,"date":"2024-01-01T00:00:00Z"}
        ]"#;
        let storage = MemoryStorage::new().with_record("scores", raw);
        let ledger = ScoreLedger::load(&storage, "scores", 1);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.best().unwrap().player_name, "fast");
    }

    #[test]
    fn test_load_keeps_rows_with_null_fields() {
        let raw = r#"[
            {"name":"old","moves":12,"date":"2024-01-01T00:00:00Z"},
            {"name":"nulls","moves":9,"time":null,"gameMode":null,"timeLimit":null,"date":"2024-01-02T00:00:00Z"}
        ]"#;
        let storage = MemoryStorage::new().with_record("scores", raw);
        let ledger = ScoreLedger::load(&storage, "scores", 10);

        assert_eq!(ledger.len(), 2);
        let best = ledger.best().unwrap();
        assert_eq!(best.player_name, "nulls");
        assert_eq!(best.elapsed_seconds, 0);
        assert_eq!(best.mode, TimerMode::Stopwatch);
    }
}
