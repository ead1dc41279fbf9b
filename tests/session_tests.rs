//! Session integration tests: timer expiry, delayed tasks and persistence.

use chrono::{TimeZone, Utc};

use flag_match::catalog::{Catalog, CatalogEntry, GroupFilter};
use flag_match::cards::{CardId, Face};
use flag_match::core::GameConfig;
use flag_match::ledger::{FileStorage, MemoryStorage, ScoreLedger, ScoreStorage};
use flag_match::rules::{IgnoreReason, RoundPhase, RoundResult, SelectOutcome};
use flag_match::session::{FixedClock, Session};
use flag_match::timer::{TimerMode, TimerSettings};

fn catalog() -> Catalog {
    Catalog::from_entries(vec![
        CatalogEntry::new("HU", "Magyarország", "europe"),
        CatalogEntry::new("AT", "Ausztria", "europe"),
        CatalogEntry::new("JP", "Japán", "asia"),
    ])
    .unwrap()
}

fn config() -> GameConfig {
    GameConfig::default()
        .with_group(GroupFilter::group("europe"))
        .with_pair_count(2)
        .with_seed(11)
}

/// Card ids of `entry`, image first.
fn cards_of(session: &Session, entry: &str) -> (CardId, CardId) {
    let round = session.round().unwrap();
    let find = |face| {
        round
            .cards()
            .find(|c| c.entry_id.as_str() == entry && c.face == face)
            .unwrap()
            .id
    };
    (find(Face::Image), find(Face::Text))
}

/// Match every pair, letting each reveal settle.
fn play_perfect(session: &mut Session) {
    for entry in ["HU", "AT"] {
        let (image, text) = cards_of(session, entry);
        session.select_card(image);
        session.select_card(text);
        session.advance(500);
    }
}

// =============================================================================
// Countdown
// =============================================================================

#[test]
fn test_countdown_expiry_ends_round() {
    let config = config().with_timer(TimerSettings::countdown(3));
    let mut session = Session::new(config, catalog(), MemoryStorage::new()).unwrap();
    session.start_round("Anna").unwrap();

    let (hu, _) = cards_of(&session, "HU");
    session.select_card(hu);
    session.advance(3_000);

    let round = session.round().unwrap();
    assert_eq!(round.phase(), RoundPhase::TimedOut);
    assert!(round.selected().is_empty());
    assert!(session.timer().is_expired());
    assert_eq!(session.last_result(), Some(RoundResult::TimedOut { matched_pairs: 0 }));
    assert_eq!(session.pending_tasks(), 0);

    assert_eq!(
        session.select_card(hu),
        SelectOutcome::Ignored(IgnoreReason::RoundOver)
    );
    assert!(session.leaderboard().is_empty());
}

#[test]
fn test_expiry_during_reveal_drops_hide() {
    let config = config().with_timer(TimerSettings::countdown(3));
    let mut session = Session::new(config, catalog(), MemoryStorage::new()).unwrap();
    session.start_round("Anna").unwrap();
    session.advance(2_500);

    let (hu, _) = cards_of(&session, "HU");
    let (at, _) = cards_of(&session, "AT");
    session.select_card(hu);
    assert_eq!(session.select_card(at), SelectOutcome::Mismatched);

    // Expiry at 3000 lands before the hide at 3500.
    session.advance(500);
    let round = session.round().unwrap();
    assert_eq!(round.phase(), RoundPhase::TimedOut);
    assert!(round.selected().is_empty());
    assert_eq!(round.move_count(), 1);
    assert_eq!(session.pending_tasks(), 0);
}

#[test]
fn test_countdown_win_records_mode() {
    let at = Utc.with_ymd_and_hms(2025, 5, 1, 10, 30, 0).unwrap();
    let config = config().with_timer(TimerSettings::countdown(60));
    let mut session = Session::new(config, catalog(), MemoryStorage::new())
        .unwrap()
        .with_clock(FixedClock(at));
    session.start_round("Anna").unwrap();
    session.advance(7_000);
    play_perfect(&mut session);

    let best = session.leaderboard().best().cloned().unwrap();
    assert_eq!(best.mode, TimerMode::Countdown);
    assert_eq!(best.limit_seconds, Some(60));
    assert_eq!(best.elapsed_seconds, 7);
    assert_eq!(best.timestamp, at);
}

// =============================================================================
// Delayed tasks
// =============================================================================

#[test]
fn test_restart_drops_pending_hide() {
    let mut session = Session::new(config(), catalog(), MemoryStorage::new()).unwrap();
    session.start_round("Anna").unwrap();

    let (hu, _) = cards_of(&session, "HU");
    let (at, _) = cards_of(&session, "AT");
    session.select_card(hu);
    session.select_card(at);

    session.restart().unwrap();
    let (hu, _) = cards_of(&session, "HU");
    session.select_card(hu);

    // The old hide would have fired here and cleared the new selection.
    session.advance(1_000);
    assert_eq!(session.round().unwrap().selected(), &[hu]);
    assert_eq!(session.timer().elapsed_seconds(), 1);
}

#[test]
fn test_clicks_during_reveal_ignored() {
    let mut session = Session::new(config(), catalog(), MemoryStorage::new()).unwrap();
    session.start_round("Anna").unwrap();

    let (hu_image, hu_text) = cards_of(&session, "HU");
    let (at, _) = cards_of(&session, "AT");
    session.select_card(hu_image);
    session.select_card(at);

    assert_eq!(
        session.select_card(hu_text),
        SelectOutcome::Ignored(IgnoreReason::SelectionFull)
    );
    assert_eq!(session.round().unwrap().move_count(), 1);

    session.advance(1_000);
    assert_eq!(session.select_card(hu_text), SelectOutcome::Selected);
}

#[test]
fn test_timer_stops_on_completion() {
    let mut session = Session::new(config(), catalog(), MemoryStorage::new()).unwrap();
    session.start_round("Anna").unwrap();
    session.advance(3_000);
    play_perfect(&mut session);

    assert_eq!(session.round().unwrap().phase(), RoundPhase::Complete);
    let elapsed = session.timer().elapsed_seconds();
    session.advance(5_000);
    assert_eq!(session.timer().elapsed_seconds(), elapsed);
    assert_eq!(session.pending_tasks(), 0);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_scores_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    for name in ["Anna", "Béla"] {
        let storage = FileStorage::new(dir.path());
        let mut session = Session::new(config(), catalog(), storage).unwrap();
        session.start_round(name).unwrap();
        play_perfect(&mut session);
    }

    let storage = FileStorage::new(dir.path());
    let ledger = ScoreLedger::load(&storage, "flagGameScores", 10);
    let names: Vec<_> = ledger.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "Béla"]);
    assert!(dir.path().join("flagGameScores.json").exists());
}

#[test]
fn test_corrupt_ledger_is_replaced() {
    let storage = MemoryStorage::new().with_record("flagGameScores", "{not json");
    let mut session = Session::new(config(), catalog(), storage).unwrap();
    assert!(session.leaderboard().is_empty());

    session.start_round("Anna").unwrap();
    play_perfect(&mut session);

    assert_eq!(session.leaderboard().len(), 1);
    assert_eq!(session.last_rank(), Some(0));
}

#[test]
fn test_legacy_entries_without_mode_load() {
    let legacy = r#"[{"name":"Régi","moves":14,"time":95,"date":"2024-12-24T18:00:00Z"}]"#;
    let storage = MemoryStorage::new().with_record("flagGameScores", legacy);
    let session = Session::new(config(), catalog(), storage).unwrap();

    let ledger = session.leaderboard();
    let entry = ledger.best().unwrap();
    assert_eq!(entry.player_name, "Régi");
    assert_eq!(entry.mode, TimerMode::Stopwatch);
    assert_eq!(entry.limit_seconds, None);
}

#[test]
fn test_clear_ledger() {
    let mut session = Session::new(config(), catalog(), MemoryStorage::new()).unwrap();
    session.start_round("Anna").unwrap();
    play_perfect(&mut session);
    assert_eq!(session.leaderboard().len(), 1);

    session.clear_ledger().unwrap();
    assert!(session.leaderboard().is_empty());
}

#[test]
fn test_ledger_capacity_from_config() {
    let mut config = config();
    config.ledger.capacity = 2;
    let mut session = Session::new(config, catalog(), MemoryStorage::new()).unwrap();

    for (i, name) in ["A", "B", "C"].into_iter().enumerate() {
        session.start_round(name).unwrap();
        // Slower each round, so each new score ranks last.
        session.advance(1_000 * (i as u64 + 1));
        play_perfect(&mut session);
    }

    let ledger = session.leaderboard();
    assert_eq!(ledger.len(), 2);
    let names: Vec<_> = ledger.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(session.last_rank(), None);
}

#[test]
fn test_storage_rejects_path_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path());
    assert!(storage.write("../escape", "[]").is_err());
    assert!(storage.read("a/b").is_err());
}
