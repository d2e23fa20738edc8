//! Upload storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// File storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploaded files
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Per-file size limit in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_UPLOAD_DIR"));
        }
        if self.max_upload_bytes < KIB || self.max_upload_bytes > 100 * MIB {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_max_upload_bytes() -> u64 {
    10 * MIB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_tiny_and_huge_limits() {
        let mut config = StorageConfig::default();
        config.max_upload_bytes = 100;
        assert!(config.validate().is_err());
        config.max_upload_bytes = 500 * MIB;
        assert!(config.validate().is_err());
    }
}
