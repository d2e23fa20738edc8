//! File content storage port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UploadId, UserId};

/// Result of storing a file: where it landed and what was written.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Path relative to the storage root, recorded in the database.
    pub relative_path: String,
    pub size_bytes: u64,
    /// Hex SHA-256 of the bytes.
    pub checksum: String,
}

/// Stores raw file bytes, keyed by owner and upload id.
///
/// Implementations must write atomically: a crash mid-write may leave a
/// temp file but never a partial file at the final path.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn put(
        &self,
        owner_id: &UserId,
        upload_id: UploadId,
        bytes: &[u8],
    ) -> Result<StoredFile, DomainError>;

    async fn get(&self, relative_path: &str) -> Result<Vec<u8>, DomainError>;

    async fn remove(&self, relative_path: &str) -> Result<(), DomainError>;
}
