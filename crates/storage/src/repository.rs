use recall_core::model::{Deck, SessionState};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("invalid deck name: {0:?}")]
    InvalidName(String),

    #[error("lock poisoned: {0}")]
    Lock(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for deck documents.
pub trait DeckRepository: Send + Sync {
    /// Names of all stored decks, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing cannot be read.
    fn list_decks(&self) -> Result<Vec<String>, StorageError>;

    /// Fetch a deck by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    fn load_deck(&self, name: &str) -> Result<Deck, StorageError>;

    /// Persist or replace a deck.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the deck cannot be stored.
    fn save_deck(&self, deck: &Deck) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if existence cannot be determined.
    fn deck_exists(&self, name: &str) -> Result<bool, StorageError>;
}

/// Repository contract for the one resumable session each deck may have.
pub trait SessionRepository: Send + Sync {
    /// Fetch the saved session stored under `deck_name`, if any.
    ///
    /// The returned state's own deck name is not checked against `deck_name`;
    /// callers decide what a mismatch means.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a saved session exists but cannot be read or
    /// fails validation.
    fn load_session(&self, deck_name: &str) -> Result<Option<SessionState>, StorageError>;

    /// Replace the saved session for `state.deck_name()` as a whole document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be written.
    fn save_session(&self, state: &SessionState) -> Result<(), StorageError>;

    /// Remove the saved session for `deck_name`. Removing nothing is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if an existing session cannot be removed.
    fn delete_session(&self, deck_name: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    decks: Arc<Mutex<HashMap<String, Deck>>>,
    sessions: Arc<Mutex<HashMap<String, SessionState>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            decks: Arc::new(Mutex::new(HashMap::new())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl DeckRepository for InMemoryRepository {
    fn list_decks(&self) -> Result<Vec<String>, StorageError> {
        let guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        let mut names: Vec<String> = guard.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn load_deck(&self, name: &str) -> Result<Deck, StorageError> {
        let guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.get(name).cloned().ok_or(StorageError::NotFound)
    }

    fn save_deck(&self, deck: &Deck) -> Result<(), StorageError> {
        let mut guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.insert(deck.name().to_owned(), deck.clone());
        Ok(())
    }

    fn deck_exists(&self, name: &str) -> Result<bool, StorageError> {
        let guard = self
            .decks
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.contains_key(name))
    }
}

impl SessionRepository for InMemoryRepository {
    fn load_session(&self, deck_name: &str) -> Result<Option<SessionState>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.get(deck_name).cloned())
    }

    fn save_session(&self, state: &SessionState) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.insert(state.deck_name().to_owned(), state.clone());
        Ok(())
    }

    fn delete_session(&self, deck_name: &str) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.remove(deck_name);
        Ok(())
    }
}

/// Aggregates deck and session repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub decks: Arc<dyn DeckRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let decks: Arc<dyn DeckRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo);
        Self { decks, sessions }
    }

    /// JSON files under `dir`, created if missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directories cannot be created.
    pub fn json(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let repo = JsonRepository::open(dir)?;
        let decks: Arc<dyn DeckRepository> = Arc::new(repo.clone());
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo);
        Ok(Self { decks, sessions })
    }
}
