use std::fs;

use recall_core::model::Deck;

use super::{DeckRecord, EXTENSION, JsonRepository, read_document, ser, write_document};
use crate::repository::{DeckRepository, StorageError};

impl DeckRepository for JsonRepository {
    fn list_decks(&self) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root())? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn load_deck(&self, name: &str) -> Result<Deck, StorageError> {
        let path = self.deck_path(name)?;
        let record: DeckRecord = read_document(&path)?.ok_or(StorageError::NotFound)?;
        record.into_deck().map_err(ser)
    }

    fn save_deck(&self, deck: &Deck) -> Result<(), StorageError> {
        let path = self.deck_path(deck.name())?;
        write_document(&path, &DeckRecord::from_deck(deck))?;
        log::debug!("saved deck {:?} to {}", deck.name(), path.display());
        Ok(())
    }

    fn deck_exists(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.deck_path(name)?.is_file())
    }
}
