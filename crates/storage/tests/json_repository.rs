use std::fs;

use recall_core::model::{Card, Deck, DeckStats, SessionState, SessionStats, Word};
use recall_core::time::fixed_now;
use storage::{DeckRepository, JsonRepository, SessionRepository, Storage, StorageError, import_csv};

fn sample_deck() -> Deck {
    let mut deck = Deck::new("fruits").unwrap();
    deck.add_word(
        Word::new("banana", ["ba", "na", "na"])
            .unwrap()
            .with_ipa("bəˈnɑːnə")
            .with_translation("バナナ"),
    );
    deck.add_word(Word::new("fig", ["fig"]).unwrap());
    deck
}

#[test]
fn deck_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonRepository::open(dir.path()).unwrap();

    let mut deck = sample_deck();
    deck.record_session(&SessionStats {
        elapsed: chrono::Duration::milliseconds(12_500),
        studied: 3,
        remembered: 1,
        total_cards: 2,
    });
    repo.save_deck(&deck).unwrap();

    assert!(dir.path().join("fruits.json").is_file());
    assert!(repo.deck_exists("fruits").unwrap());
    let loaded = repo.load_deck("fruits").unwrap();
    assert_eq!(loaded, deck);
    assert!((loaded.stats().total_time_secs() - 12.5).abs() < 1e-9);
}

#[test]
fn missing_deck_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonRepository::open(dir.path()).unwrap();
    assert!(matches!(repo.load_deck("nope"), Err(StorageError::NotFound)));
    assert!(!repo.deck_exists("nope").unwrap());
}

#[test]
fn listing_ignores_sessions_and_other_files() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::json(dir.path()).unwrap();

    storage.decks.save_deck(&sample_deck()).unwrap();
    storage.decks.save_deck(&Deck::new("animals").unwrap()).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a deck").unwrap();

    let deck = sample_deck();
    let state = SessionState::fresh(
        "fruits",
        vec![Card::new(deck.words()[0].clone(), 1)],
        fixed_now(),
    );
    storage.sessions.save_session(&state).unwrap();

    assert_eq!(storage.decks.list_decks().unwrap(), vec!["animals", "fruits"]);
}

#[test]
fn session_round_trip_keeps_progress() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonRepository::open(dir.path()).unwrap();
    let deck = sample_deck();

    let mut state = SessionState::fresh(
        deck.name(),
        vec![
            Card::new(deck.words()[0].clone(), 2),
            Card::new(deck.words()[1].clone(), 0),
        ],
        fixed_now(),
    );
    state.record_answer(0, "wrong").unwrap();
    state.record_answer(1, "FIG").unwrap();
    repo.save_session(&state).unwrap();

    assert!(dir.path().join("sessions").join("fruits.json").is_file());
    let restored = repo.load_session("fruits").unwrap().unwrap();
    assert_eq!(restored.remaining_indices(), &[0]);
    assert_eq!(restored.studied_count(), 2);
    assert_eq!(restored.cards()[0].first_attempt_correct(), Some(false));
    assert_eq!(restored.cards()[1].first_attempt_correct(), Some(true));
    assert_eq!(restored.started_at(), fixed_now());
    assert_eq!(restored.cards()[0].prompt(), "ba-na-___");
}

#[test]
fn legacy_field_names_are_read() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonRepository::open(dir.path()).unwrap();
    fs::write(
        dir.path().join("old.json"),
        r#"{
            "name": "old",
            "words": [{"word": "cat", "syllables": ["cat"], "ipa": "kæt", "japanese": "ねこ"}],
            "stats": {"total_time": 30.0, "total_sessions": 1, "total_studied": 2, "total_remembered": 1}
        }"#,
    )
    .unwrap();

    let deck = repo.load_deck("old").unwrap();
    assert_eq!(deck.words()[0].text(), "cat");
    assert_eq!(deck.words()[0].translation(), "ねこ");
    assert_eq!(
        deck.stats(),
        &DeckStats::from_persisted(30.0, 1, 2, 1).unwrap()
    );
}

#[test]
fn malformed_session_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonRepository::open(dir.path()).unwrap();
    fs::write(dir.path().join("sessions").join("fruits.json"), "{ not json").unwrap();

    assert!(matches!(
        repo.load_session("fruits"),
        Err(StorageError::Serialization(_))
    ));
}

#[test]
fn deleting_sessions_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonRepository::open(dir.path()).unwrap();
    let deck = sample_deck();
    let state = SessionState::fresh(
        deck.name(),
        vec![Card::new(deck.words()[1].clone(), 0)],
        fixed_now(),
    );

    repo.save_session(&state).unwrap();
    repo.delete_session("fruits").unwrap();
    repo.delete_session("fruits").unwrap();
    assert!(repo.load_session("fruits").unwrap().is_none());
}

#[test]
fn names_that_escape_the_directory_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonRepository::open(dir.path()).unwrap();
    assert!(matches!(
        repo.load_deck("../etc"),
        Err(StorageError::InvalidName(_))
    ));
    assert!(matches!(
        repo.delete_session("a/b"),
        Err(StorageError::InvalidName(_))
    ));
}

#[test]
fn imported_deck_can_be_saved_and_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("words.csv");
    fs::write(&csv_path, "word,ipa,japanese\ncomputer,kəmˈpjuːtər,コンピューター\n").unwrap();

    let deck = import_csv(&csv_path, "tech").unwrap();
    let repo = JsonRepository::open(dir.path().join("decks")).unwrap();
    repo.save_deck(&deck).unwrap();

    let loaded = repo.load_deck("tech").unwrap();
    assert_eq!(loaded.words()[0].syllables(), ["co", "mpu", "ter"]);
    assert_eq!(loaded.words()[0].translation(), "コンピューター");
    assert_eq!(loaded.stats(), &DeckStats::default());
}
