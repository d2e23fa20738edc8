//! DeleteUploadHandler - soft delete; bytes stay on disk.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, UploadId};
use crate::ports::UploadRepository;

#[derive(Debug, Clone)]
pub struct DeleteUploadCommand {
    pub upload_id: UploadId,
}

pub struct DeleteUploadHandler {
    uploads: Arc<dyn UploadRepository>,
}

impl DeleteUploadHandler {
    pub fn new(uploads: Arc<dyn UploadRepository>) -> Self {
        Self { uploads }
    }

    pub async fn handle(
        &self,
        cmd: DeleteUploadCommand,
        actor: &AuthenticatedUser,
    ) -> Result<(), DomainError> {
        let upload = self
            .uploads
            .find_by_id(&cmd.upload_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Upload", cmd.upload_id))?;

        if !actor.can_act_for(&upload.owner_id) {
            return Err(DomainError::forbidden("Cannot delete this upload"));
        }

        self.uploads.soft_delete(&cmd.upload_id).await
    }
}
