//! Shared error types for the services crate.

use thiserror::Error;

use recall_core::model::{DeckError, SessionStateError};
use storage::{ImportError, StorageError};

/// Errors emitted by `DeckService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeckServiceError {
    #[error("deck {0:?} already exists")]
    AlreadyExists(String),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the session engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already finished")]
    Finished,
    #[error("console error: {source}{}", unsaved_note(.unsaved.as_ref()))]
    Console {
        #[source]
        source: std::io::Error,
        /// Set when saving progress after the read failure also failed.
        unsaved: Option<StorageError>,
    },
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn unsaved_note(unsaved: Option<&StorageError>) -> String {
    unsaved.map_or_else(String::new, |err| format!(" (progress not saved: {err})"))
}
