//! GetUploadHandler - metadata and content reads.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, UploadId};
use crate::domain::upload::Upload;
use crate::ports::{FileStore, UploadRepository};

#[derive(Debug, Clone)]
pub struct GetUploadQuery {
    pub upload_id: UploadId,
}

/// Metadata plus the raw bytes, for the download endpoint.
#[derive(Debug, Clone)]
pub struct UploadContent {
    pub upload: Upload,
    pub bytes: Vec<u8>,
}

pub struct GetUploadHandler {
    uploads: Arc<dyn UploadRepository>,
    files: Arc<dyn FileStore>,
}

impl GetUploadHandler {
    pub fn new(uploads: Arc<dyn UploadRepository>, files: Arc<dyn FileStore>) -> Self {
        Self { uploads, files }
    }

    pub async fn handle_metadata(
        &self,
        query: GetUploadQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Option<Upload>, DomainError> {
        let Some(upload) = self.uploads.find_by_id(&query.upload_id).await? else {
            return Ok(None);
        };
        if !actor.can_act_for(&upload.owner_id) {
            return Err(DomainError::forbidden("Cannot access this upload"));
        }
        Ok(Some(upload))
    }

    pub async fn handle_content(
        &self,
        query: GetUploadQuery,
        actor: &AuthenticatedUser,
    ) -> Result<Option<UploadContent>, DomainError> {
        let Some(upload) = self.handle_metadata(query, actor).await? else {
            return Ok(None);
        };
        let bytes = self.files.get(&upload.stored_path).await?;
        Ok(Some(UploadContent { upload, bytes }))
    }
}
