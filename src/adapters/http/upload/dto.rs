//! HTTP DTOs for upload endpoints.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::upload::Upload;

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub checksum: String,
    pub created_at: Timestamp,
}

impl From<Upload> for UploadResponse {
    fn from(upload: Upload) -> Self {
        Self {
            id: upload.id.to_string(),
            file_name: upload.file_name,
            content_type: upload.content_type,
            size_bytes: upload.size_bytes,
            checksum: upload.checksum,
            created_at: upload.created_at,
        }
    }
}
