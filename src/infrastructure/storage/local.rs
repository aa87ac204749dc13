use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::media::extension_of;
use crate::errors::AppError;

use super::{MediaStore, StagedFile, StoredMedia};

/// Filesystem-backed blob store. Files land under `root` with a UUID name
/// and are served read-only under `public_prefix`.
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        LocalMediaStore {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Creates the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn storage_name(original: &str) -> String {
        match extension_of(original) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(&self, staged: &StagedFile) -> Result<StoredMedia, AppError> {
        let name = Self::storage_name(&staged.file_name);
        let dest = self.root.join(&name);

        // copy, not rename: the temp file may sit on another filesystem
        tokio::fs::copy(&staged.temp_path, &dest).await?;

        Ok(StoredMedia {
            url: format!("{}/{}", self.public_prefix.trim_end_matches('/'), name),
            file_name: name,
        })
    }
}
