mod card;
mod deck;
mod session;
mod word;

pub use card::{AnswerCheck, Card, CharFeedback, CharStatus, diff_chars};
pub use deck::{Deck, DeckError, DeckStats};
pub use session::{SessionState, SessionStateError, SessionStats};
pub use word::{PLACEHOLDER, SYLLABLE_SEPARATOR, Word, WordError};
