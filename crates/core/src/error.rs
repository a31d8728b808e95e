use thiserror::Error;

use crate::model::{DeckError, SessionStateError, WordError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    SessionState(#[from] SessionStateError),
}
