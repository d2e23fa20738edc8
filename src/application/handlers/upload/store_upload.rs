//! StoreUploadHandler - persist bytes, then metadata.
//!
//! The file lands on disk first; if the metadata insert then fails the
//! stored bytes are removed so no orphan files accumulate.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError, UploadId};
use crate::domain::upload::Upload;
use crate::ports::{FileStore, UploadRepository};

#[derive(Debug, Clone)]
pub struct StoreUploadCommand {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct StoreUploadHandler {
    uploads: Arc<dyn UploadRepository>,
    files: Arc<dyn FileStore>,
}

impl StoreUploadHandler {
    pub fn new(uploads: Arc<dyn UploadRepository>, files: Arc<dyn FileStore>) -> Self {
        Self { uploads, files }
    }

    pub async fn handle(
        &self,
        cmd: StoreUploadCommand,
        actor: &AuthenticatedUser,
    ) -> Result<Upload, DomainError> {
        if cmd.file_name.trim().is_empty() {
            return Err(DomainError::validation("file_name", "File name cannot be empty"));
        }

        let upload_id = UploadId::new();
        let stored = self.files.put(&actor.id, upload_id, &cmd.bytes).await?;

        let upload = Upload::new(
            upload_id,
            actor.id,
            cmd.file_name,
            cmd.content_type,
            stored.size_bytes,
            stored.checksum,
            stored.relative_path.clone(),
        );

        if let Err(e) = self.uploads.save(&upload).await {
            // Best effort; an orphan here is a leak, not corruption.
            let _ = self.files.remove(&stored.relative_path).await;
            return Err(e);
        }

        tracing::info!(upload_id = %upload.id, size = upload.size_bytes, "stored upload");
        Ok(upload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockFileStore, MockUploadRepository};
    use crate::domain::foundation::{ErrorCode, Role, UserId};

    fn actor() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "u@example.com", Role::Customer, None)
    }

    #[tokio::test]
    async fn stores_bytes_and_metadata() {
        let uploads = Arc::new(MockUploadRepository::new());
        let files = Arc::new(MockFileStore::new());
        let handler = StoreUploadHandler::new(uploads.clone(), files.clone());

        let upload = handler
            .handle(
                StoreUploadCommand {
                    file_name: "invoice.pdf".to_string(),
                    content_type: "application/pdf".to_string(),
                    bytes: b"pdf bytes".to_vec(),
                },
                &actor(),
            )
            .await
            .unwrap();

        assert_eq!(upload.size_bytes, 9);
        assert_eq!(upload.file_name, "invoice.pdf");
        assert!(files.files.lock().unwrap().contains_key(&upload.stored_path));
        assert_eq!(uploads.uploads.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let handler = StoreUploadHandler::new(
            Arc::new(MockUploadRepository::new()),
            Arc::new(MockFileStore::new()),
        );

        let err = handler
            .handle(
                StoreUploadCommand {
                    file_name: "empty.bin".to_string(),
                    content_type: "application/octet-stream".to_string(),
                    bytes: vec![],
                },
                &actor(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn empty_file_name_is_rejected() {
        let handler = StoreUploadHandler::new(
            Arc::new(MockUploadRepository::new()),
            Arc::new(MockFileStore::new()),
        );

        let err = handler
            .handle(
                StoreUploadCommand {
                    file_name: " ".to_string(),
                    content_type: "text/plain".to_string(),
                    bytes: b"data".to_vec(),
                },
                &actor(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
