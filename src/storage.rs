//! Key-value persistence behind a small trait so the history log and app
//! config can run against browser `localStorage` or an in-memory map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AuralisError;

// Storage keys
pub const STORAGE_HISTORY: &str = "auralis.history";
pub const STORAGE_BACKEND_URL: &str = "auralis.backend_url";

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore {
    /// Raw stored value, `None` when the key is absent.
    fn get_raw(&self, key: &str) -> Result<Option<String>, AuralisError>;

    fn set_raw(&self, key: &str, value: &str) -> Result<(), AuralisError>;

    fn remove(&self, key: &str) -> Result<(), AuralisError>;
}

/// Browser `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn raw() -> Result<web_sys::Storage, AuralisError> {
        web_sys::window()
            .ok_or_else(|| AuralisError::Storage("No window available".to_string()))?
            .local_storage()
            .map_err(|e| AuralisError::Storage(format!("localStorage access denied: {:?}", e)))?
            .ok_or_else(|| AuralisError::Storage("localStorage is disabled".to_string()))
    }

    /// Whether the browser grants access to `localStorage` at all.
    pub fn is_available() -> bool {
        Self::raw().is_ok()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, AuralisError> {
        Self::raw()?
            .get_item(key)
            .map_err(|e| AuralisError::Storage(format!("Failed to read '{}': {:?}", key, e)))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), AuralisError> {
        Self::raw()?
            .set_item(key, value)
            .map_err(|e| AuralisError::Storage(format!("Failed to write '{}': {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<(), AuralisError> {
        Self::raw()?
            .remove_item(key)
            .map_err(|e| AuralisError::Storage(format!("Failed to remove '{}': {:?}", key, e)))
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, AuralisError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), AuralisError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuralisError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Wraps a [`MemoryStorage`] and fails reads or writes on demand.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct FailingStorage {
    pub inner: MemoryStorage,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[cfg(test)]
impl FailingStorage {
    pub fn unreadable(inner: MemoryStorage) -> Self {
        Self {
            inner,
            fail_reads: true,
            fail_writes: false,
        }
    }

    pub fn read_only(inner: MemoryStorage) -> Self {
        Self {
            inner,
            fail_reads: false,
            fail_writes: true,
        }
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, AuralisError> {
        if self.fail_reads {
            return Err(AuralisError::Storage(format!("read of '{}' denied", key)));
        }
        self.inner.get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), AuralisError> {
        if self.fail_writes {
            return Err(AuralisError::Storage(format!("quota exceeded for '{}'", key)));
        }
        self.inner.set_raw(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), AuralisError> {
        if self.fail_writes {
            return Err(AuralisError::Storage(format!("remove of '{}' denied", key)));
        }
        self.inner.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_raw("k").unwrap(), None);

        storage.set_raw("k", "v").unwrap();
        assert_eq!(storage.get_raw("k").unwrap(), Some("v".to_string()));

        storage.remove("k").unwrap();
        assert!(!storage.contains("k"));
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_raw("shared", "1").unwrap();
        assert_eq!(other.get_raw("shared").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_failing_storage_passes_through_allowed_operations() {
        let inner = MemoryStorage::new();
        inner.set_raw("k", "v").unwrap();

        let read_only = FailingStorage::read_only(inner.clone());
        assert_eq!(read_only.get_raw("k").unwrap(), Some("v".to_string()));
        assert!(matches!(read_only.set_raw("k", "w"), Err(AuralisError::Storage(_))));
        assert!(matches!(read_only.remove("k"), Err(AuralisError::Storage(_))));
        assert!(inner.contains("k"));

        let unreadable = FailingStorage::unreadable(inner.clone());
        assert!(matches!(unreadable.get_raw("k"), Err(AuralisError::Storage(_))));
        unreadable.remove("k").unwrap();
        assert!(!inner.contains("k"));
    }
}
