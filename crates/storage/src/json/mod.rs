//! Deck and session documents stored as JSON files.
//!
//! Layout under the root directory:
//! ```text
//! {root}/{deck}.json            # deck document
//! {root}/sessions/{deck}.json   # resumable session, if any
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::repository::StorageError;

mod deck_repo;
mod mapping;
mod session_repo;

pub use mapping::{CardRecord, DeckRecord, DeckStatsRecord, SessionRecord, WordRecord};

const EXTENSION: &str = "json";
const SESSIONS_DIR: &str = "sessions";

#[derive(Debug, Clone)]
pub struct JsonRepository {
    root: PathBuf,
}

impl JsonRepository {
    /// Use `root` as the deck directory, creating it and its session
    /// subdirectory when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directories cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(SESSIONS_DIR))?;
        log::debug!("json storage ready at {}", root.display());
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the deck document for `name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidName` if `name` cannot be used as a file name.
    pub fn deck_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(file_name(name)?))
    }

    /// Path of the saved session for the deck `name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidName` if `name` cannot be used as a file name.
    pub fn session_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(SESSIONS_DIR).join(file_name(name)?))
    }
}

fn file_name(name: &str) -> Result<String, StorageError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed.starts_with('.')
        || trimmed.contains(['/', '\\', '\0'])
        || trimmed != name;
    if invalid {
        return Err(StorageError::InvalidName(name.to_owned()));
    }
    Ok(format!("{name}.{EXTENSION}"))
}

fn ser<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Reads and parses `path`; `Ok(None)` when the file does not exist.
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&raw).map(Some).map_err(ser)
}

/// Replaces `path` as a whole: the document is written to a temporary file in
/// the same directory and renamed over the target.
fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let dir = path
        .parent()
        .ok_or_else(|| StorageError::InvalidName(path.display().to_string()))?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(tmp.as_file_mut(), value).map_err(ser)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}
