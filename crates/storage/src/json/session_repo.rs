use std::fs;
use std::io;

use recall_core::model::SessionState;

use super::{JsonRepository, SessionRecord, read_document, ser, write_document};
use crate::repository::{SessionRepository, StorageError};

impl SessionRepository for JsonRepository {
    fn load_session(&self, deck_name: &str) -> Result<Option<SessionState>, StorageError> {
        let path = self.session_path(deck_name)?;
        let Some(record) = read_document::<SessionRecord>(&path)? else {
            return Ok(None);
        };
        record.into_state().map(Some).map_err(ser)
    }

    fn save_session(&self, state: &SessionState) -> Result<(), StorageError> {
        let path = self.session_path(state.deck_name())?;
        write_document(&path, &SessionRecord::from_state(state))?;
        log::debug!(
            "saved session for {:?}: {} card(s) remaining",
            state.deck_name(),
            state.remaining_indices().len()
        );
        Ok(())
    }

    fn delete_session(&self, deck_name: &str) -> Result<(), StorageError> {
        let path = self.session_path(deck_name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("removed session file {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
