pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::AppError;

/// An upload already buffered to disk by the multipart extractor, reduced
/// to the data the storage and classification steps need.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub temp_path: PathBuf,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

/// Result of persisting a staged upload: a collision-free storage name and
/// the stable URL it is served under.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMedia {
    pub file_name: String,
    pub url: String,
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn store(&self, staged: &StagedFile) -> Result<StoredMedia, AppError>;
}
