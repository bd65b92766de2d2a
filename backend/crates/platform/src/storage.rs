//! File Storage
//!
//! Public file storage for uploaded images. Files are written under a root
//! directory with random names and addressed by their path relative to it
//! (`categories/3kP9x...Qa.png`). The same relative path is what the
//! database stores and what [`FileStorage::url`] turns into a public URL.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::crypto::random_alphanumeric;

/// Length of generated file stems
const FILE_STEM_LENGTH: usize = 40;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Storage backend trait
#[trait_variant::make(FileStorage: Send)]
pub trait LocalFileStorage {
    /// Store `bytes` as a new file in `dir`; returns the relative path
    async fn put(&self, dir: &str, extension: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Remove a stored file. Missing files are not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;

    /// Public URL of a stored file
    fn url(&self, path: &str) -> String;
}

/// Filesystem storage served statically under `{public_base}/storage`
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
    public_base: String,
}

impl DiskStorage {
    /// Create the root directory if needed
    pub async fn new(
        root: impl Into<PathBuf>,
        public_base: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await.map_err(|source| StorageError::Io {
            path: root.display().to_string(),
            source,
        })?;

        Ok(Self {
            root,
            public_base: public_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path inside the root, refusing traversal
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if path.is_empty() || !safe {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl FileStorage for DiskStorage {
    async fn put(&self, dir: &str, extension: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let relative = format!(
            "{}/{}.{}",
            dir.trim_matches('/'),
            random_alphanumeric(FILE_STEM_LENGTH),
            extension.trim_start_matches('.').to_ascii_lowercase()
        );
        let full_path = self.resolve(&relative)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|source| StorageError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        fs::write(&full_path, bytes)
            .await
            .map_err(|source| StorageError::Io {
                path: relative.clone(),
                source,
            })?;

        debug!(path = %relative, size = bytes.len(), "Stored file");
        Ok(relative)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let full_path = self.resolve(path)?;

        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path = %path, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/storage/{}", self.public_base, path.trim_start_matches('/'))
    }
}
