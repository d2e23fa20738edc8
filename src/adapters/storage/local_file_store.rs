//! Local filesystem implementation of the `FileStore` port.
//!
//! Stores upload bytes in an owner-organized directory structure with
//! atomic writes and SHA-256 checksums.
//!
//! # Directory Structure
//!
//! ```text
//! {base_path}/
//! ├── user_abc123/
//! │   ├── f_def456
//! │   └── f_ghi789
//! └── user_xyz987/
//!     └── f_aaa111
//! ```
//!
//! # Atomic Writes
//!
//! Write-to-temp-then-rename:
//! 1. Write content to `f_{id}.tmp`
//! 2. Sync to disk
//! 3. Rename to `f_{id}`
//!
//! A crash mid-write may leave a temp file but never a partial file at
//! the final path.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::foundation::{DomainError, ErrorCode, UploadId, UserId};
use crate::ports::{FileStore, StoredFile};

/// Local filesystem storage for uploads.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    /// Base directory for all upload storage.
    base_path: PathBuf,
    /// Per-file size cap in bytes.
    max_bytes: u64,
}

impl LocalFileStore {
    pub fn new(base_path: impl Into<PathBuf>, max_bytes: u64) -> Self {
        Self {
            base_path: base_path.into(),
            max_bytes,
        }
    }

    fn owner_dir(&self, owner_id: &UserId) -> PathBuf {
        self.base_path.join(format!("user_{}", owner_id))
    }

    fn relative_path(owner_id: &UserId, upload_id: UploadId) -> String {
        format!("user_{}/f_{}", owner_id, upload_id)
    }

    /// Rejects path components that could escape the storage root.
    fn resolve(&self, relative_path: &str) -> Result<PathBuf, DomainError> {
        let path = Path::new(relative_path);
        if path.is_absolute()
            || path
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Invalid storage path",
            ));
        }
        Ok(self.base_path.join(path))
    }
}

fn storage_error(context: &str, e: std::io::Error) -> DomainError {
    DomainError::new(ErrorCode::StorageError, format!("{}: {}", context, e))
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn put(
        &self,
        owner_id: &UserId,
        upload_id: UploadId,
        bytes: &[u8],
    ) -> Result<StoredFile, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::validation("file", "Uploaded file is empty"));
        }
        if bytes.len() as u64 > self.max_bytes {
            return Err(DomainError::validation(
                "file",
                format!("File exceeds the {} byte limit", self.max_bytes),
            ));
        }

        let dir = self.owner_dir(owner_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| storage_error("Failed to create upload directory", e))?;

        let final_path = dir.join(format!("f_{}", upload_id));
        let temp_path = dir.join(format!("f_{}.tmp", upload_id));

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| storage_error("Failed to create temp file", e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| storage_error("Failed to write upload", e))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error("Failed to sync upload", e))?;
        drop(file);

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| storage_error("Failed to finalize upload", e))?;

        let checksum = format!("{:x}", Sha256::digest(bytes));

        Ok(StoredFile {
            relative_path: Self::relative_path(owner_id, upload_id),
            size_bytes: bytes.len() as u64,
            checksum,
        })
    }

    async fn get(&self, relative_path: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.resolve(relative_path)?;
        fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DomainError::not_found("Upload content", relative_path)
            } else {
                storage_error("Failed to read upload", e)
            }
        })
    }

    async fn remove(&self, relative_path: &str) -> Result<(), DomainError> {
        let path = self.resolve(relative_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("Failed to remove upload", e)),
        }
    }
}
