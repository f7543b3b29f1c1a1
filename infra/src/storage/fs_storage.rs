//! Filesystem object storage.
//!
//! Files are copied into a directory the web server exposes as static
//! content, under a random name that keeps the original extension.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use sv_core::errors::DomainError;
use sv_core::repositories::ObjectStorage;
use sv_shared::config::StorageConfig;

use crate::InfrastructureError;

/// Object storage writing into a served directory
#[derive(Debug, Clone)]
pub struct FsObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl FsObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_base_url)
    }

    /// Directory uploads land in
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn stored_name(local_path: &Path) -> String {
        let id = Uuid::new_v4().simple().to_string();
        match local_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
                format!("{}.{}", id, ext.to_ascii_lowercase())
            }
            _ => id,
        }
    }

    async fn store(&self, local_path: &Path) -> Result<String, InfrastructureError> {
        tokio::fs::create_dir_all(&self.root).await?;

        let name = Self::stored_name(local_path);
        tokio::fs::copy(local_path, self.root.join(&name)).await?;

        Ok(format!("{}/{}", self.public_base_url, name))
    }
}

#[async_trait]
impl ObjectStorage for FsObjectStorage {
    async fn upload(&self, local_path: &Path) -> Result<String, DomainError> {
        let result = self.store(local_path).await;

        // The temp file is consumed either way.
        if let Err(e) = tokio::fs::remove_file(local_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %local_path.display(), error = %e, "failed to remove temp upload");
            }
        }

        match result {
            Ok(url) => {
                tracing::debug!(url = %url, "upload stored");
                Ok(url)
            }
            Err(e) => {
                tracing::error!(path = %local_path.display(), error = %e, "upload failed");
                Err(e.into())
            }
        }
    }
}
