use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filesystem storage rooted at an explicit base directory. Relative paths
/// are joined onto the base; absolute paths are used as given.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading {}", full_path.display());

        tokio::fs::read(&full_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => EtlError::InputNotFound { path: full_path },
            _ => EtlError::InputUnreadable {
                path: full_path,
                source: e,
            },
        })
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        let full_path = self.resolve(path);

        tokio::fs::create_dir_all(&full_path)
            .await
            .map_err(|e| EtlError::OutputDirectory {
                path: full_path,
                source: e,
            })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| EtlError::OutputWrite {
                path: full_path,
                source: e,
            })
    }
}
