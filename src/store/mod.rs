//! Key-Value Store Module - Local persistence for upload data
//!
//! Provides the storage collaborator the upload manager commits chunks to.
//! Backends must report a capacity rejection as a typed outcome rather than
//! an error, so callers can distinguish "store is full" from "store is broken".

mod handle;
mod memory;
mod sled_store;

pub use handle::{StoreConfig, StoreHandle};
pub use memory::MemoryStore;
pub use sled_store::SledStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    OpenFailed(String),

    #[error("Read failed for key '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Write failed for key '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Remove failed for key '{key}': {reason}")]
    RemoveFailed { key: String, reason: String },

    #[error("Scan failed: {0}")]
    ScanFailed(String),
}

/// Outcome of a `set` operation.
///
/// A write rejected for capacity is an expected condition, not a failure:
/// the upload manager reacts to it by rolling back, while a `StoreError`
/// means the backend itself misbehaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Value was written.
    Stored,
    /// Write rejected: storing the value would exceed the store's capacity.
    QuotaExceeded,
}

/// Capability interface for the upload manager's storage collaborator.
///
/// Values are serialized strings (JSON); usage accounting counts
/// `key bytes + value bytes` per entry, matching how browser local
/// storage quotas are typically estimated.
pub trait KeyValueStore: Send + Sync {
    /// Store a value under a key, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<SetOutcome, StoreError>;

    /// Fetch the value stored under a key.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Enumerate all entries as `(key, value byte length)` pairs.
    fn scan(&self) -> Result<Vec<(String, u64)>, StoreError>;
}
