//! Note collection snapshot repository.
//!
//! # Responsibility
//! - Read the whole note collection from one blob store key.
//! - Write the whole collection back as a single JSON snapshot.
//!
//! # Invariants
//! - Reads never fail: missing, blank, unreadable or malformed data is an
//!   empty collection.
//! - Writes are full replacements; saving the same collection twice leaves
//!   the store in the same state.

use crate::model::note::Note;
use crate::store::{BlobStore, StoreError, StoreResult};
use log::{debug, warn};

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Parsed from a stored snapshot.
    Stored,
    /// Key absent or blank.
    Missing,
    /// Store read failed.
    ReadFailed,
    /// Stored value was not a valid note array.
    Malformed,
}

/// Repository mapping a note collection onto one blob store key.
pub struct NotesRepository<S: BlobStore> {
    store: S,
    key: String,
}

impl<S: BlobStore> NotesRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the stored collection, degrading every failure to empty.
    pub fn load(&self) -> (Vec<Note>, LoadOutcome) {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                debug!("event=notes_load module=repo status=missing key={}", self.key);
                return (Vec::new(), LoadOutcome::Missing);
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=error error_code=read_failed key={} error={}",
                    self.key, err
                );
                return (Vec::new(), LoadOutcome::ReadFailed);
            }
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                debug!(
                    "event=notes_load module=repo status=ok key={} count={}",
                    self.key,
                    notes.len()
                );
                (notes, LoadOutcome::Stored)
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=error error_code=parse_failed key={} bytes={} error={}",
                    self.key,
                    raw.len(),
                    err
                );
                (Vec::new(), LoadOutcome::Malformed)
            }
        }
    }

    /// Serializes and writes the full collection.
    ///
    /// # Errors
    /// - Returns the store error when the write fails.
    pub fn save(&mut self, notes: &[Note]) -> StoreResult<()> {
        let payload = serde_json::to_string(notes)
            .map_err(|err| StoreError::Unavailable(format!("failed to encode notes: {err}")))?;
        self.store.set(&self.key, &payload)?;
        debug!(
            "event=notes_save module=repo status=ok key={} count={} bytes={}",
            self.key,
            notes.len(),
            payload.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOutcome, NotesRepository};
    use crate::model::note::{seed_notes, Note};
    use crate::store::{BlobStore, MemoryBlobStore, StoreError, StoreResult};

    const KEY: &str = "notenest-notes";

    struct BrokenStore;

    impl BlobStore for BrokenStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Unavailable("quota".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("quota".to_string()))
        }
    }

    #[test]
    fn load_degrades_missing_blank_and_malformed_values_to_empty() {
        let missing = NotesRepository::new(MemoryBlobStore::new(), KEY);
        assert_eq!(missing.load(), (Vec::new(), LoadOutcome::Missing));

        let blank = NotesRepository::new(MemoryBlobStore::with_entry(KEY, "  "), KEY);
        assert_eq!(blank.load(), (Vec::new(), LoadOutcome::Missing));

        let malformed = NotesRepository::new(MemoryBlobStore::with_entry(KEY, "{not json"), KEY);
        assert_eq!(malformed.load(), (Vec::new(), LoadOutcome::Malformed));

        let wrong_shape =
            NotesRepository::new(MemoryBlobStore::with_entry(KEY, r#"[{"id":"x"}]"#), KEY);
        assert_eq!(wrong_shape.load().1, LoadOutcome::Malformed);

        let broken = NotesRepository::new(BrokenStore, KEY);
        assert_eq!(broken.load(), (Vec::new(), LoadOutcome::ReadFailed));
    }

    #[test]
    fn save_then_load_preserves_order_and_optional_fields() {
        let mut repo = NotesRepository::new(MemoryBlobStore::new(), KEY);
        let mut notes = seed_notes();
        notes.push(Note::new(1_700_000_000_000, "Later".to_string(), None, 1_700_000_000_000));
        repo.save(&notes).unwrap();

        let (loaded, outcome) = repo.load();
        assert_eq!(outcome, LoadOutcome::Stored);
        assert_eq!(loaded, notes);
    }

    #[test]
    fn save_surfaces_store_failures() {
        let mut repo = NotesRepository::new(BrokenStore, KEY);
        assert!(repo.save(&seed_notes()).is_err());
    }
}
