//! In-memory key-value store with an optional capacity ceiling.
//!
//! Used by tests and as the fallback when no data path is configured.
//! The capacity ceiling makes quota-rejection paths reproducible without
//! filling a real disk.

use super::{KeyValueStore, SetOutcome, StoreError};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local store backed by a `HashMap`.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    capacity: Option<u64>,
}

impl MemoryStore {
    /// Create an unbounded in-memory store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: None,
        }
    }

    /// Create a store that rejects writes past `capacity` total bytes
    /// (counting key bytes + value bytes, like the usage measurement does).
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    fn used_bytes(entries: &HashMap<String, String>) -> u64 {
        entries
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &str) -> Result<SetOutcome, StoreError> {
        let mut entries = self.entries.lock();

        if let Some(capacity) = self.capacity {
            let current = Self::used_bytes(&entries);
            // Overwrites free the old value's bytes first
            let replaced = entries
                .get(key)
                .map(|v| (key.len() + v.len()) as u64)
                .unwrap_or(0);
            let after = current - replaced + (key.len() + value.len()) as u64;

            if after > capacity {
                return Ok(SetOutcome::QuotaExceeded);
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(SetOutcome::Stored)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn scan(&self) -> Result<Vec<(String, u64)>, StoreError> {
        Ok(self
            .entries
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.len() as u64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.set("a", "hello").unwrap(), SetOutcome::Stored);
        assert_eq!(store.get("a").unwrap(), Some("hello".to_string()));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);

        // Removing again is fine
        store.remove("a").unwrap();
    }

    #[test]
    fn test_capacity_rejection() {
        let store = MemoryStore::with_capacity(10);

        // "ab" + "cd" = 4 bytes, fits
        assert_eq!(store.set("ab", "cd").unwrap(), SetOutcome::Stored);

        // Adding 8 more bytes would exceed 10
        assert_eq!(
            store.set("ef", "ghijkl").unwrap(),
            SetOutcome::QuotaExceeded
        );

        // Rejected write leaves no trace
        assert_eq!(store.get("ef").unwrap(), None);
    }

    #[test]
    fn test_overwrite_frees_old_bytes() {
        let store = MemoryStore::with_capacity(10);

        assert_eq!(store.set("k", "12345678").unwrap(), SetOutcome::Stored);
        // Same key, same size: replacement should fit
        assert_eq!(store.set("k", "abcdefgh").unwrap(), SetOutcome::Stored);
        assert_eq!(store.get("k").unwrap(), Some("abcdefgh".to_string()));
    }

    #[test]
    fn test_scan_reports_value_lengths() {
        let store = MemoryStore::new();
        store.set("one", "x").unwrap();
        store.set("two", "yy").unwrap();

        let mut entries = store.scan().unwrap();
        entries.sort();
        assert_eq!(
            entries,
            vec![("one".to_string(), 1), ("two".to_string(), 2)]
        );
    }
}
