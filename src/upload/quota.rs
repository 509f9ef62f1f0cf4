//! Quota policy and storage usage accounting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Policy parameters for quota-aware uploads.
///
/// The defaults mirror conservative browser local-storage behavior: a 5 MiB
/// budget, 1 MiB chunks, and a 50% overhead allowance for JSON encoding.
/// None of these are load-bearing constants; deployments can tune them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaPolicy {
    /// Total storage budget (bytes)
    pub storage_budget: u64,

    /// Maximum chunk size (bytes)
    pub chunk_size: u64,

    /// Multiplier applied to the batch size when estimating storage needed
    /// (accounts for serialization overhead)
    pub encoding_overhead: f64,

    /// Refuse to start an upload when usage is above this percentage
    pub preflight_threshold_pct: f64,

    /// Maximum number of files per batch
    pub max_files: usize,

    /// Maximum total batch size (bytes)
    pub max_total_size: u64,

    /// Artificial delay between chunk commits (milliseconds), standing in
    /// for real network transfer time
    pub chunk_delay_ms: u64,

    /// Key prefix for everything this manager writes to the store
    pub namespace: String,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            storage_budget: 5 * 1024 * 1024,      // 5 MiB
            chunk_size: 1024 * 1024,              // 1 MiB
            encoding_overhead: 1.5,
            preflight_threshold_pct: 80.0,
            max_files: 1000,
            max_total_size: 100 * 1024 * 1024,    // 100 MiB
            chunk_delay_ms: 100,
            namespace: "recipebox-uploads".to_string(),
        }
    }
}

impl QuotaPolicy {
    /// Transient key used to probe whether the store accepts writes.
    pub fn probe_key(&self) -> String {
        format!("{}-test", self.namespace)
    }

    /// Key for the chunk at `index`.
    pub fn chunk_key(&self, index: usize) -> String {
        format!("{}-chunk-{}", self.namespace, index)
    }

    /// Key for the batch completion marker.
    pub fn metadata_key(&self) -> String {
        format!("{}-metadata", self.namespace)
    }
}

/// Snapshot of store usage against the configured budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StorageUsage {
    /// Bytes currently consumed
    pub used: u64,

    /// Bytes remaining under the budget
    pub available: u64,

    /// Used fraction of the budget, clamped to 0-100
    pub percentage: f64,
}

impl StorageUsage {
    /// Derive a snapshot from raw usage and a budget.
    pub fn from_used(used: u64, budget: u64) -> Self {
        let available = budget.saturating_sub(used);
        let percentage = if budget == 0 {
            100.0
        } else {
            (used as f64 / budget as f64 * 100.0).min(100.0)
        };
        Self {
            used,
            available,
            percentage,
        }
    }

    /// The "storage unavailable or unreadable" snapshot.
    pub fn empty(budget: u64) -> Self {
        Self {
            used: 0,
            available: budget,
            percentage: 0.0,
        }
    }
}

/// Completion marker written after every chunk of a batch has committed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadMetadata {
    /// Number of files in the batch
    pub total_files: usize,

    /// Number of chunks the batch was partitioned into
    pub total_chunks: usize,

    /// When the batch finished committing
    pub upload_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_from_empty_store() {
        let usage = StorageUsage::from_used(0, 5 * 1024 * 1024);
        assert_eq!(usage.used, 0);
        assert_eq!(usage.available, 5 * 1024 * 1024);
        assert_eq!(usage.percentage, 0.0);
    }

    #[test]
    fn test_usage_percentage_clamps_at_100() {
        let usage = StorageUsage::from_used(10 * 1024 * 1024, 5 * 1024 * 1024);
        assert_eq!(usage.available, 0);
        assert_eq!(usage.percentage, 100.0);
    }

    #[test]
    fn test_key_layout() {
        let policy = QuotaPolicy::default();
        assert_eq!(policy.probe_key(), "recipebox-uploads-test");
        assert_eq!(policy.chunk_key(3), "recipebox-uploads-chunk-3");
        assert_eq!(policy.metadata_key(), "recipebox-uploads-metadata");
    }
}
