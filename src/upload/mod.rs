//! Upload Module - Quota-aware batch uploads
//!
//! Partitions a batch of logical files into size-bounded chunks, checks the
//! storage budget before writing anything, and commits chunks one at a time
//! with full rollback if any commit is rejected.

mod chunker;
mod manager;
mod quota;

pub use chunker::{partition_into_chunks, Chunk, LogicalFile};
pub use manager::{
    UploadManager, UploadProgress, UploadReceipt, UploadStatus, ValidationReport,
};
pub use quota::{QuotaPolicy, StorageUsage, UploadMetadata};

use crate::store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid upload: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Browser storage is {percentage:.1}% full. Please clear storage before uploading.")]
    StorageNearlyFull { percentage: f64 },

    #[error("Upload size ({needed_mib:.1}MB) exceeds available storage ({available_mib:.1}MB). Please clear storage or upload fewer files.")]
    InsufficientSpace {
        needed_mib: f64,
        available_mib: f64,
    },

    #[error("Storage quota exceeded. Please clear storage and try again.")]
    QuotaExceeded,

    #[error("Storage quota exceeded during upload. Please clear storage and try again.")]
    QuotaExceededDuringUpload,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Upload failed: {0}")]
    Unknown(String),
}

impl UploadError {
    /// Whether this failure is capacity-related, meaning a "clear storage"
    /// affordance would help the user.
    pub fn is_quota_related(&self) -> bool {
        matches!(
            self,
            UploadError::StorageNearlyFull { .. }
                | UploadError::InsufficientSpace { .. }
                | UploadError::QuotaExceeded
                | UploadError::QuotaExceededDuringUpload
        )
    }
}
