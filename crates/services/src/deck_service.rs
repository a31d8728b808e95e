use std::path::Path;
use std::sync::Arc;

use recall_core::model::Deck;
use storage::{DeckRepository, SessionRepository};

use crate::error::DeckServiceError;

/// One row of the deck listing. Counts are `None` when the deck file could
/// not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckListItem {
    pub name: String,
    pub words: Option<usize>,
    pub sessions: Option<u64>,
    pub has_saved_session: bool,
}

/// Orchestrates deck creation, import and persistence.
#[derive(Clone)]
pub struct DeckService {
    decks: Arc<dyn DeckRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl DeckService {
    #[must_use]
    pub fn new(decks: Arc<dyn DeckRepository>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { decks, sessions }
    }

    /// List stored decks by name with their word and session counts.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if the listing cannot be read.
    pub fn list(&self) -> Result<Vec<DeckListItem>, DeckServiceError> {
        let names = self.decks.list_decks()?;
        let items = names
            .into_iter()
            .map(|name| {
                let (words, sessions) = match self.decks.load_deck(&name) {
                    Ok(deck) => (
                        Some(deck.words().len()),
                        Some(deck.stats().total_sessions()),
                    ),
                    Err(err) => {
                        log::warn!("could not read deck {name:?}: {err}");
                        (None, None)
                    }
                };
                // a file left by another deck is not resumable here
                let has_saved_session = matches!(
                    self.sessions.load_session(&name),
                    Ok(Some(state)) if state.deck_name() == name
                );
                DeckListItem {
                    name,
                    words,
                    sessions,
                    has_saved_session,
                }
            })
            .collect();
        Ok(items)
    }

    /// Create and persist an empty deck.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Deck` for an empty name,
    /// `DeckServiceError::AlreadyExists` if the name is taken, or
    /// `DeckServiceError::Storage` if persistence fails.
    pub fn create(&self, name: &str) -> Result<Deck, DeckServiceError> {
        let deck = Deck::new(name)?;
        self.ensure_free(deck.name())?;
        self.decks.save_deck(&deck)?;
        log::info!("created deck {:?}", deck.name());
        Ok(deck)
    }

    /// Import a CSV word list as a new deck and persist it.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::AlreadyExists` if the name is taken,
    /// `DeckServiceError::Import` if the CSV cannot be read, or
    /// `DeckServiceError::Storage` if persistence fails.
    pub fn import_csv(&self, path: impl AsRef<Path>, name: &str) -> Result<Deck, DeckServiceError> {
        let name = Deck::new(name)?.name().to_owned();
        self.ensure_free(&name)?;
        let deck = storage::import_csv(path, &name)?;
        self.decks.save_deck(&deck)?;
        Ok(deck)
    }

    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` (`NotFound` included) if the deck cannot be read.
    pub fn load(&self, name: &str) -> Result<Deck, DeckServiceError> {
        Ok(self.decks.load_deck(name)?)
    }

    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if persistence fails.
    pub fn save(&self, deck: &Deck) -> Result<(), DeckServiceError> {
        Ok(self.decks.save_deck(deck)?)
    }

    /// Zero the cumulative stats of a deck and persist it.
    ///
    /// # Errors
    ///
    /// Returns `DeckServiceError::Storage` if the deck cannot be read or written.
    pub fn reset_stats(&self, name: &str) -> Result<Deck, DeckServiceError> {
        let mut deck = self.decks.load_deck(name)?;
        deck.reset_stats();
        self.decks.save_deck(&deck)?;
        log::info!("reset stats for deck {:?}", deck.name());
        Ok(deck)
    }

    fn ensure_free(&self, name: &str) -> Result<(), DeckServiceError> {
        if self.decks.deck_exists(name)? {
            return Err(DeckServiceError::AlreadyExists(name.to_owned()));
        }
        Ok(())
    }
}

impl From<&storage::Storage> for DeckService {
    fn from(storage: &storage::Storage) -> Self {
        Self::new(Arc::clone(&storage.decks), Arc::clone(&storage.sessions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use recall_core::time::fixed_now;
    use recall_core::model::{SessionState, SessionStats, Word};
    use storage::{Storage, StorageError};

    fn service() -> (Storage, DeckService) {
        let storage = Storage::in_memory();
        let service = DeckService::from(&storage);
        (storage, service)
    }

    #[test]
    fn create_rejects_duplicates_and_blank_names() {
        let (_storage, service) = service();
        service.create("fruits").unwrap();

        assert!(matches!(
            service.create(" fruits "),
            Err(DeckServiceError::AlreadyExists(name)) if name == "fruits"
        ));
        assert!(matches!(service.create("   "), Err(DeckServiceError::Deck(_))));
    }

    #[test]
    fn list_reports_counts() {
        let (storage, service) = service();
        let mut deck = service.create("fruits").unwrap();
        deck.add_word(Word::new("fig", ["fig"]).unwrap());
        deck.record_session(&SessionStats {
            elapsed: Duration::seconds(5),
            studied: 1,
            remembered: 1,
            total_cards: 1,
        });
        service.save(&deck).unwrap();
        service.create("animals").unwrap();

        let items = service.list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "animals");
        assert_eq!(items[1].words, Some(1));
        assert_eq!(items[1].sessions, Some(1));
        assert!(!items[1].has_saved_session);
        assert!(storage.decks.deck_exists("animals").unwrap());
    }

    #[test]
    fn saved_session_counts_only_for_its_own_deck() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::json(dir.path()).unwrap();
        let service = DeckService::from(&storage);
        service.create("pets").unwrap();

        // a session written for "other" sitting under the pets file name
        let sessions = dir.path().join("sessions");
        storage
            .sessions
            .save_session(&SessionState::fresh("other", vec![], fixed_now()))
            .unwrap();
        std::fs::rename(sessions.join("other.json"), sessions.join("pets.json")).unwrap();
        assert!(!service.list().unwrap()[0].has_saved_session);

        storage
            .sessions
            .save_session(&SessionState::fresh("pets", vec![], fixed_now()))
            .unwrap();
        assert!(service.list().unwrap()[0].has_saved_session);
    }

    #[test]
    fn reset_stats_persists_zeroed_counters() {
        let (_storage, service) = service();
        let mut deck = service.create("fruits").unwrap();
        deck.record_session(&SessionStats {
            elapsed: Duration::seconds(90),
            studied: 4,
            remembered: 2,
            total_cards: 2,
        });
        service.save(&deck).unwrap();

        service.reset_stats("fruits").unwrap();
        let reloaded = service.load("fruits").unwrap();
        assert_eq!(reloaded.stats().total_sessions(), 0);
        assert_eq!(reloaded.stats().total_studied(), 0);
    }

    #[test]
    fn missing_deck_is_a_storage_error() {
        let (_storage, service) = service();
        assert!(matches!(
            service.load("nope"),
            Err(DeckServiceError::Storage(StorageError::NotFound))
        ));
    }
}
