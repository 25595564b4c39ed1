use log::{info, warn};

use super::types::HistoryRecord;
use crate::error::AuralisError;
use crate::storage::KeyValueStore;

/// Maximum number of records kept in the log.
pub const HISTORY_CAPACITY: usize = 50;

/// Bounded, newest-first log of analysis records kept under one storage key.
/// All operations are synchronous read-modify-write against the backing store.
#[derive(Debug, Clone)]
pub struct HistoryStore<S> {
    storage: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Create a store over `storage` using `key` and the default capacity.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self::with_capacity(storage, key, HISTORY_CAPACITY)
    }

    /// A zero capacity is raised to one so the newest append always survives.
    pub fn with_capacity(storage: S, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            storage,
            key: key.into(),
            capacity: capacity.max(1),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read the log. Missing, unreadable or corrupt data yields an empty log;
    /// corrupt data is removed from storage.
    pub fn load(&self) -> Vec<HistoryRecord> {
        let raw = match self.storage.get_raw(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read history '{}': {}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Discarding corrupt history '{}': {}", self.key, e);
                if let Err(e) = self.storage.remove(&self.key) {
                    warn!("Failed to remove corrupt history '{}': {}", self.key, e);
                }
                Vec::new()
            }
        }
    }

    /// Insert `record` at the head, evict past capacity, persist, and return
    /// the resulting log.
    pub fn append(&self, record: HistoryRecord) -> Result<Vec<HistoryRecord>, AuralisError> {
        let mut records = self.load();
        records.insert(0, record);
        records.truncate(self.capacity);

        let json = serde_json::to_string(&records)?;
        self.storage.set_raw(&self.key, &json)?;

        info!(
            "Saved analysis to history '{}' ({} of {} entries)",
            self.key,
            records.len(),
            self.capacity
        );
        Ok(records)
    }

    /// Remove the log entirely.
    pub fn clear(&self) -> Result<(), AuralisError> {
        self.storage.remove(&self.key)?;
        info!("Cleared history '{}'", self.key);
        Ok(())
    }
}
