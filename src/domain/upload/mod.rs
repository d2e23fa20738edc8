//! Uploaded file metadata.
//!
//! File bytes live on disk behind the `FileStore` port; this entity is
//! the database-side record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UploadId, UserId};

/// Metadata for one stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upload {
    pub id: UploadId,
    pub owner_id: UserId,
    /// Original client file name, kept for download headers.
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// Hex SHA-256 of the stored bytes.
    pub checksum: String,
    /// Path relative to the storage root.
    pub stored_path: String,
    pub deleted: bool,
    pub created_at: Timestamp,
}

impl Upload {
    /// The id is allocated by the caller so the stored path can embed it
    /// before the record exists.
    pub fn new(
        id: UploadId,
        owner_id: UserId,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
        checksum: impl Into<String>,
        stored_path: impl Into<String>,
    ) -> Self {
        Self {
            id,
            owner_id,
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
            checksum: checksum.into(),
            stored_path: stored_path.into(),
            deleted: false,
            created_at: Timestamp::now(),
        }
    }
}
