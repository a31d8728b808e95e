//! CSV word-list import.
//!
//! The first row is a header. A `word` column is required; `ipa` and
//! `japanese` (or `translation`) are picked up when present. Header names are
//! matched case-insensitively.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use recall_core::model::{Deck, DeckError, Word, WordError};
use recall_core::syllables::split_syllables;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("csv has no {0:?} column")]
    MissingColumn(&'static str),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Word(#[from] WordError),
}

struct Columns {
    word: usize,
    ipa: Option<usize>,
    translation: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let find = |names: &[&str]| {
            headers.iter().position(|header| {
                let header = header.trim().to_lowercase();
                names.iter().any(|name| header == *name)
            })
        };
        Ok(Self {
            word: find(&["word"]).ok_or(ImportError::MissingColumn("word"))?,
            ipa: find(&["ipa"]),
            translation: find(&["japanese", "translation"]),
        })
    }
}

/// Parse words from CSV. Rows with a blank word are skipped.
///
/// # Errors
///
/// Returns `ImportError` if the header lacks a `word` column or the CSV is malformed.
pub fn read_words_csv(reader: impl Read) -> Result<Vec<Word>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::locate(reader.headers()?)?;
    let cell = |record: &csv::StringRecord, index: Option<usize>| {
        index
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .to_owned()
    };

    let mut words = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let text = cell(&record, Some(columns.word));
        if text.is_empty() {
            log::debug!("skipping csv row {} with no word", row + 1);
            continue;
        }
        let syllables = split_syllables(&text);
        let word = Word::new(text, syllables)?
            .with_ipa(cell(&record, columns.ipa))
            .with_translation(cell(&record, columns.translation));
        words.push(word);
    }
    Ok(words)
}

/// Build a new deck named `deck_name` from the CSV file at `path`.
///
/// # Errors
///
/// Returns `ImportError` if the file cannot be read or parsed, or the name is blank.
pub fn import_csv(path: impl AsRef<Path>, deck_name: &str) -> Result<Deck, ImportError> {
    let path = path.as_ref();
    let mut deck = Deck::new(deck_name)?;
    let words = read_words_csv(File::open(path)?)?;
    log::info!(
        "imported {} word(s) from {} into {:?}",
        words.len(),
        path.display(),
        deck.name()
    );
    for word in words {
        deck.add_word(word);
    }
    Ok(deck)
}
