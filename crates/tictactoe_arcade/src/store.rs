//! Record store abstraction and an in-memory implementation.

use std::sync::{Arc, Mutex};

use tracing::{debug, instrument, warn};

use crate::{MatchRecord, StorageError};

/// Append-only store of finished games.
pub trait RecordStore: Send + Sync {
    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the record could not be written. Nothing
    /// is stored in that case.
    fn save(&self, record: &MatchRecord) -> Result<(), StorageError>;

    /// Returns every stored record in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the records could not be read.
    fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError>;
}

impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    fn save(&self, record: &MatchRecord) -> Result<(), StorageError> {
        (**self).save(record)
    }

    fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        (**self).fetch_all()
    }
}

/// Loads every record, degrading to an empty list on failure.
#[instrument(skip(store))]
pub fn fetch_or_empty(store: &dyn RecordStore) -> Vec<MatchRecord> {
    match store.fetch_all() {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Record store unavailable, using empty history");
            Vec::new()
        }
    }
}

/// Process-local record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<MatchRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    #[instrument(skip(self, record), fields(id = %record.id()))]
    fn save(&self, record: &MatchRecord) -> Result<(), StorageError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StorageError::new("Memory store lock poisoned"))?;
        records.push(record.clone());
        debug!(count = records.len(), "Record stored in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    fn fetch_all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StorageError::new("Memory store lock poisoned"))?;
        Ok(records.clone())
    }
}
