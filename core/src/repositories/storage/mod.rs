//! Object storage for uploaded profile images.

use async_trait::async_trait;
use std::path::Path;

use crate::errors::DomainError;

/// Moves a locally received file to durable storage
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload the file at `local_path` and return its public URL
    ///
    /// The local file is consumed whether or not the upload succeeds.
    async fn upload(&self, local_path: &Path) -> Result<String, DomainError>;
}
