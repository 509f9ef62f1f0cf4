//! Store handle with connect-or-reuse semantics.
//!
//! The handle is constructed explicitly and owned by whoever needs storage;
//! the first call to `connect_or_reuse` opens the backend, later calls reuse
//! the same instance. When no data path is configured the handle falls back
//! to a process-local in-memory store, so callers keep working without
//! durable storage (matching a demo deployment with no database configured).

use super::{KeyValueStore, MemoryStore, SledStore, StoreError};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the backing store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Directory for the sled database. `None` selects the in-memory fallback.
    pub data_path: Option<PathBuf>,

    /// Capacity ceiling in bytes. `None` means unbounded.
    pub capacity: Option<u64>,
}

impl StoreConfig {
    /// Durable store at `path` with no capacity ceiling.
    pub fn durable(path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: Some(path.into()),
            capacity: None,
        }
    }

    /// In-memory store, optionally capacity-limited.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Set the capacity ceiling.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Lazily-connected handle to the key-value store.
pub struct StoreHandle {
    config: StoreConfig,
    store: OnceCell<Arc<dyn KeyValueStore>>,
}

impl StoreHandle {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            store: OnceCell::new(),
        }
    }

    /// Open the configured backend on first call; reuse it afterwards.
    pub fn connect_or_reuse(&self) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        let store = self.store.get_or_try_init(|| {
            match &self.config.data_path {
                Some(path) => {
                    let store = match self.config.capacity {
                        Some(capacity) => SledStore::open_with_capacity(path, capacity)?,
                        None => SledStore::open(path)?,
                    };
                    tracing::info!(path = %path.display(), "Opened sled store");
                    Ok(Arc::new(store) as Arc<dyn KeyValueStore>)
                }
                None => {
                    tracing::warn!("No data path configured, using in-memory store");
                    let store = match self.config.capacity {
                        Some(capacity) => MemoryStore::with_capacity(capacity),
                        None => MemoryStore::new(),
                    };
                    Ok(Arc::new(store) as Arc<dyn KeyValueStore>)
                }
            }
        })?;
        Ok(Arc::clone(store))
    }
}
