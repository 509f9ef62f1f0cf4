//! Sled-backed key-value store.
//!
//! Durable backend for upload data. Enforces the same capacity ceiling
//! semantics as [`MemoryStore`]: a write that would push total usage past
//! the ceiling returns `SetOutcome::QuotaExceeded` instead of an error,
//! since sled itself has no built-in quota.

use super::{KeyValueStore, SetOutcome, StoreError};
use std::path::Path;

/// Durable store backed by a sled tree.
pub struct SledStore {
    db: sled::Db,
    capacity: Option<u64>,
}

impl SledStore {
    /// Open (or create) a sled database at `path` with no capacity ceiling.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = sled::open(path.as_ref())
            .map_err(|e| StoreError::OpenFailed(e.to_string()))?;
        Ok(Self { db, capacity: None })
    }

    /// Open a sled database that rejects writes past `capacity` total bytes.
    pub fn open_with_capacity(
        path: impl AsRef<Path>,
        capacity: u64,
    ) -> Result<Self, StoreError> {
        let mut store = Self::open(path)?;
        store.capacity = Some(capacity);
        Ok(store)
    }

    fn used_bytes(&self) -> Result<u64, StoreError> {
        let mut used = 0u64;
        for entry in self.db.iter() {
            let (key, value) = entry.map_err(|e| StoreError::ScanFailed(e.to_string()))?;
            used += (key.len() + value.len()) as u64;
        }
        Ok(used)
    }
}

impl KeyValueStore for SledStore {
    fn set(&self, key: &str, value: &str) -> Result<SetOutcome, StoreError> {
        if let Some(capacity) = self.capacity {
            let current = self.used_bytes()?;
            let replaced = self
                .db
                .get(key)
                .map_err(|e| StoreError::ReadFailed {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?
                .map(|v| (key.len() + v.len()) as u64)
                .unwrap_or(0);
            let after = current - replaced + (key.len() + value.len()) as u64;

            if after > capacity {
                return Ok(SetOutcome::QuotaExceeded);
            }
        }

        self.db
            .insert(key, value.as_bytes())
            .map_err(|e| StoreError::WriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(SetOutcome::Stored)
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.db.get(key).map_err(|e| StoreError::ReadFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec()).map_err(|e| {
                    StoreError::ReadFailed {
                        key: key.to_string(),
                        reason: format!("stored value is not valid UTF-8: {}", e),
                    }
                })?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.db
            .remove(key)
            .map_err(|e| StoreError::RemoveFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn scan(&self) -> Result<Vec<(String, u64)>, StoreError> {
        let mut entries = Vec::new();
        for entry in self.db.iter() {
            let (key, value) = entry.map_err(|e| StoreError::ScanFailed(e.to_string()))?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|e| StoreError::ScanFailed(format!("non-UTF-8 key: {}", e)))?;
            entries.push((key, value.len() as u64));
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = SledStore::open(dir.path().join("db")).unwrap();

        assert_eq!(store.set("k", "value").unwrap(), SetOutcome::Stored);
        assert_eq!(store.get("k").unwrap(), Some("value".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_capacity_ceiling() {
        let dir = TempDir::new().unwrap();
        let store = SledStore::open_with_capacity(dir.path().join("db"), 16).unwrap();

        assert_eq!(store.set("a", "12345").unwrap(), SetOutcome::Stored);
        assert_eq!(
            store.set("b", "a-much-longer-value").unwrap(),
            SetOutcome::QuotaExceeded
        );
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn test_scan() {
        let dir = TempDir::new().unwrap();
        let store = SledStore::open(dir.path().join("db")).unwrap();

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
