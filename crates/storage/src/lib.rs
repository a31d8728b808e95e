#![forbid(unsafe_code)]

pub mod import;
pub mod json;
pub mod repository;

pub use import::{ImportError, import_csv, read_words_csv};
pub use json::JsonRepository;
pub use repository::{DeckRepository, InMemoryRepository, SessionRepository, Storage, StorageError};
