#![forbid(unsafe_code)]

pub mod console;
pub mod deck_service;
pub mod error;
pub mod sessions;

pub use recall_core::Clock;

pub use console::{Answer, SessionConsole, SessionEvent};
pub use deck_service::{DeckListItem, DeckService};
pub use error::{DeckServiceError, SessionError};

pub use sessions::{
    SessionBuilder, SessionEngine, SessionOutcome, SessionPhase, SessionPlan, SessionProgress,
};
