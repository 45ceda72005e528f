use crate::domain::model::{ChunkResult, Dataset, LoadSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// Where `path` lands once resolved against the storage's base.
    fn resolve(&self, path: &Path) -> PathBuf;

    fn read_file(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn create_dir_all(&self, path: &Path) -> impl std::future::Future<Output = Result<()>> + Send;
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &Path;
    fn output_dir(&self) -> &Path;
    fn metadata_path(&self) -> &Path;
    fn chunk_size(&self) -> usize;
    fn locale(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<ChunkResult>;
    async fn load(&self, result: ChunkResult) -> Result<LoadSummary>;
}
