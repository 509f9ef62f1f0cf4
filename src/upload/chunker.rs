//! Chunk partitioning - greedy, order-preserving file grouping
//!
//! Files are committed to storage in size-bounded groups so a single failed
//! write never loses more than one chunk's worth of progress. Partitioning
//! is deterministic: same input order, same chunks.

use serde::{Deserialize, Serialize};

/// A file staged for upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogicalFile {
    /// Repository-relative path
    pub path: String,

    /// File content
    pub content: String,

    /// Declared size in bytes
    pub size: u64,
}

impl LogicalFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let size = content.len() as u64;
        Self {
            path: path.into(),
            content,
            size,
        }
    }
}

/// A size-bounded group of files committed to storage as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Files in input order
    pub files: Vec<LogicalFile>,

    /// Exact sum of the member files' sizes
    pub size: u64,
}

/// Partition `files` into chunks of at most `chunk_size` bytes.
///
/// A new chunk is started only when the current one is non-empty and adding
/// the next file would push it past `chunk_size`. A single file larger than
/// `chunk_size` therefore becomes its own oversized chunk; files are never
/// split.
pub fn partition_into_chunks(files: &[LogicalFile], chunk_size: u64) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<LogicalFile> = Vec::new();
    let mut current_size = 0u64;

    for file in files {
        if current_size + file.size > chunk_size && !current.is_empty() {
            chunks.push(Chunk {
                files: std::mem::take(&mut current),
                size: current_size,
            });
            current_size = 0;
        }

        current_size += file.size;
        current.push(file.clone());
    }

    if !current.is_empty() {
        chunks.push(Chunk {
            files: current,
            size: current_size,
        });
    }

    chunks
}
