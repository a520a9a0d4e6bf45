use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageResult;

/// Receipt for a stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    /// Opaque storage id; the only handle callers may keep.
    pub id: String,
    /// Server-assigned file name (token plus original extension).
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// A file read back from storage.
#[derive(Debug, Clone)]
pub struct FileContents {
    pub bytes: Vec<u8>,
    pub size: u64,
    pub mime_type: String,
    pub filename: String,
}

/// Storage backend trait for different storage implementations.
///
/// Abstracts over the disk backend and the object-storage backend planned
/// to replace it; callers address files only by the opaque id returned
/// from [`save`](StorageBackend::save).
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Persist raw bytes, returning the receipt with the generated id.
    async fn save(
        &self,
        bytes: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> StorageResult<StoredFile>;

    /// Read a stored file back by id.
    async fn read(&self, id: &str) -> StorageResult<FileContents>;

    /// Remove a stored file; removing an absent id is not an error.
    async fn delete(&self, id: &str) -> StorageResult<()>;

    async fn exists(&self, id: &str) -> StorageResult<bool>;
}
