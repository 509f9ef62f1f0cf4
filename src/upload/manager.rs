//! Upload Manager - validation, preflight, commit loop with rollback
//!
//! Drives the full upload lifecycle: validate the batch, check the storage
//! budget before touching anything, partition into chunks, then commit
//! chunks strictly in index order. Chunks are never committed in parallel,
//! so a failed commit only ever needs to undo a contiguous prefix.

use super::chunker::{partition_into_chunks, Chunk, LogicalFile};
use super::quota::{QuotaPolicy, StorageUsage, UploadMetadata};
use super::UploadError;
use crate::store::{KeyValueStore, SetOutcome};

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

const MIB: f64 = 1024.0 * 1024.0;

/// Result of batch validation. All violations are collected, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Progress report emitted after each committed chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadProgress {
    /// Files committed so far
    pub current: usize,

    /// Files in the batch
    pub total: usize,

    /// current / total as a percentage
    pub percentage: f64,
}

/// Returned when every chunk and the metadata record have committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReceipt {
    pub uploaded_files: usize,
}

/// Read-only view of what an earlier upload left in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadStatus {
    /// Whether a completed upload's metadata is present
    pub has_data: bool,
    pub metadata: Option<UploadMetadata>,
    pub storage_usage: StorageUsage,
}

/// Manages quota-aware batch uploads against a key-value store.
pub struct UploadManager {
    store: Arc<dyn KeyValueStore>,
    policy: QuotaPolicy,
}

impl UploadManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            policy: QuotaPolicy::default(),
        }
    }

    /// Override the default quota policy.
    pub fn with_policy(mut self, policy: QuotaPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &QuotaPolicy {
        &self.policy
    }

    /// Check a batch against the policy limits.
    ///
    /// Collects every violation rather than stopping at the first, so the
    /// caller can show the user the complete list. No side effects.
    pub fn validate_files(&self, files: &[LogicalFile]) -> ValidationReport {
        let mut errors = Vec::new();

        if files.is_empty() {
            errors.push("No files to upload".to_string());
        }

        if files.len() > self.policy.max_files {
            errors.push(format!("Too many files (max {})", self.policy.max_files));
        }

        let total_size: u64 = files.iter().map(|f| f.size).sum();
        if total_size > self.policy.max_total_size {
            errors.push(format!(
                "Total file size exceeds {}MB limit",
                self.policy.max_total_size / (1024 * 1024)
            ));
        }

        for (index, file) in files.iter().enumerate() {
            if file.path.trim().is_empty() {
                errors.push(format!("File {} has invalid path", index + 1));
            }
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Measure current store usage against the budget.
    ///
    /// Sums `key bytes + value bytes` over every entry. Never fails: if the
    /// store cannot be read (or there is no store behind this environment),
    /// the zero-usage snapshot is returned instead.
    pub fn measure_storage_usage(&self) -> StorageUsage {
        match self.store.scan() {
            Ok(entries) => {
                let used: u64 = entries
                    .iter()
                    .map(|(key, value_len)| key.len() as u64 + value_len)
                    .sum();
                StorageUsage::from_used(used, self.policy.storage_budget)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to measure storage usage, assuming empty");
                StorageUsage::empty(self.policy.storage_budget)
            }
        }
    }

    /// Run preflight checks and partition the batch into chunks.
    ///
    /// Fails fast without leaving any state behind: the only write is a
    /// probe under a reserved key, removed immediately.
    pub fn prepare_upload(&self, files: &[LogicalFile]) -> Result<Vec<Chunk>, UploadError> {
        let usage = self.measure_storage_usage();
        if usage.percentage > self.policy.preflight_threshold_pct {
            return Err(UploadError::StorageNearlyFull {
                percentage: usage.percentage,
            });
        }

        let total_size: u64 = files.iter().map(|f| f.size).sum();
        let estimated_needed = total_size as f64 * self.policy.encoding_overhead;
        if estimated_needed > usage.available as f64 {
            return Err(UploadError::InsufficientSpace {
                needed_mib: estimated_needed / MIB,
                available_mib: usage.available as f64 / MIB,
            });
        }

        let chunks = partition_into_chunks(files, self.policy.chunk_size);

        // Probe that the store still accepts writes before committing anything
        let probe_key = self.policy.probe_key();
        match self.store.set(&probe_key, r#"{"test":true}"#)? {
            SetOutcome::Stored => {
                if let Err(e) = self.store.remove(&probe_key) {
                    tracing::warn!(error = %e, "Failed to remove probe key");
                }
            }
            SetOutcome::QuotaExceeded => return Err(UploadError::QuotaExceeded),
        }

        Ok(chunks)
    }

    /// Upload a batch: commit chunks in order, metadata last.
    ///
    /// `on_progress` is called after every committed chunk; `on_error` is
    /// called exactly once, with a display-ready message, if anything fails.
    /// A failed commit rolls back every chunk written for this batch, so
    /// the store never holds a partial upload.
    pub async fn upload_files<P, E>(
        &self,
        files: &[LogicalFile],
        mut on_progress: P,
        mut on_error: E,
    ) -> Result<UploadReceipt, UploadError>
    where
        P: FnMut(UploadProgress),
        E: FnMut(&str),
    {
        let chunks = match self.prepare_upload(files) {
            Ok(chunks) => chunks,
            Err(e) => {
                on_error(&e.to_string());
                return Err(e);
            }
        };

        let mut uploaded_files = 0usize;

        for (index, chunk) in chunks.iter().enumerate() {
            let serialized = match serde_json::to_string(chunk) {
                Ok(s) => s,
                Err(e) => {
                    self.rollback(index);
                    let err = UploadError::Unknown(format!("chunk serialization: {}", e));
                    on_error(&err.to_string());
                    return Err(err);
                }
            };

            match self.store.set(&self.policy.chunk_key(index), &serialized) {
                Ok(SetOutcome::Stored) => {}
                Ok(SetOutcome::QuotaExceeded) => {
                    self.rollback(index);
                    let err = UploadError::QuotaExceededDuringUpload;
                    on_error(&err.to_string());
                    return Err(err);
                }
                Err(e) => {
                    self.rollback(index);
                    let err = UploadError::Store(e);
                    on_error(&err.to_string());
                    return Err(err);
                }
            }

            uploaded_files += chunk.files.len();
            on_progress(UploadProgress {
                current: uploaded_files,
                total: files.len(),
                percentage: uploaded_files as f64 / files.len() as f64 * 100.0,
            });

            // Stand-in for real network transfer time
            if self.policy.chunk_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.policy.chunk_delay_ms)).await;
            }
        }

        let metadata = UploadMetadata {
            total_files: files.len(),
            total_chunks: chunks.len(),
            upload_time: Utc::now(),
        };
        let serialized = match serde_json::to_string(&metadata) {
            Ok(s) => s,
            Err(e) => {
                self.rollback(chunks.len());
                let err = UploadError::Unknown(format!("metadata serialization: {}", e));
                on_error(&err.to_string());
                return Err(err);
            }
        };

        match self.store.set(&self.policy.metadata_key(), &serialized) {
            Ok(SetOutcome::Stored) => {}
            Ok(SetOutcome::QuotaExceeded) => {
                self.rollback(chunks.len());
                let err = UploadError::QuotaExceededDuringUpload;
                on_error(&err.to_string());
                return Err(err);
            }
            Err(e) => {
                self.rollback(chunks.len());
                let err = UploadError::Store(e);
                on_error(&err.to_string());
                return Err(err);
            }
        }

        tracing::info!(
            files = files.len(),
            chunks = chunks.len(),
            "Upload committed"
        );

        Ok(UploadReceipt {
            uploaded_files: files.len(),
        })
    }

    /// Remove all upload keys unconditionally. Idempotent; missing keys and
    /// failed removals are not errors.
    pub fn clear_upload_data(&self) {
        self.remove_quietly(&self.policy.namespace);
        self.remove_quietly(&self.policy.metadata_key());

        for index in 0..100 {
            self.remove_quietly(&self.policy.chunk_key(index));
        }
    }

    /// Report whether a completed upload is in the store, and current usage.
    pub fn get_upload_status(&self) -> UploadStatus {
        let metadata = match self.store.get(&self.policy.metadata_key()) {
            Ok(Some(raw)) => match serde_json::from_str::<UploadMetadata>(&raw) {
                Ok(metadata) => Some(metadata),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored upload metadata is unreadable");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read upload metadata");
                None
            }
        };

        UploadStatus {
            has_data: metadata.is_some(),
            metadata,
            storage_usage: self.measure_storage_usage(),
        }
    }

    /// Undo a partial upload: remove chunks `0..committed` and the metadata
    /// key. Best-effort; a key that refuses to go is logged and skipped.
    fn rollback(&self, committed: usize) {
        for index in 0..committed {
            self.remove_quietly(&self.policy.chunk_key(index));
        }
        self.remove_quietly(&self.policy.metadata_key());
    }

    fn remove_quietly(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!(key, error = %e, "Failed to remove key during cleanup");
        }
    }
}
