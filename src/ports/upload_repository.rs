//! Upload metadata persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageQuery, UploadId, UserId};
use crate::domain::upload::Upload;

/// Persistent storage for upload metadata. Bytes live behind `FileStore`.
#[async_trait]
pub trait UploadRepository: Send + Sync {
    async fn save(&self, upload: &Upload) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UploadId) -> Result<Option<Upload>, DomainError>;

    async fn list_by_owner(
        &self,
        owner_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Upload>, DomainError>;

    /// Flips the soft-delete flag.
    async fn soft_delete(&self, id: &UploadId) -> Result<(), DomainError>;
}
