use crate::core::{chunker, loader, writer};
use crate::core::{ChunkResult, ConfigProvider, Dataset, LoadSummary, Pipeline, Storage};
use crate::utils::error::Result;
use crate::utils::messages;

/// CSV → chunked JSON, reading and writing through `S`.
pub struct ChunkPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ChunkPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ChunkPipeline<S, C> {
    async fn extract(&self) -> Result<Dataset> {
        let input = self.config.input_path();
        tracing::debug!("Loading letters from {}", input.display());

        let bytes = self.storage.read_file(input).await?;
        loader::parse_csv(&bytes, &self.storage.resolve(input))
    }

    async fn transform(&self, data: Dataset) -> Result<ChunkResult> {
        let result = chunker::chunk_dataset(data, self.config.chunk_size())?;
        tracing::debug!(
            "Split {} letters into {} chunks of up to {}",
            result.metadata.total_letters,
            result.metadata.chunks,
            result.metadata.chunk_size
        );
        Ok(result)
    }

    async fn load(&self, result: ChunkResult) -> Result<LoadSummary> {
        let locale = self.config.locale();

        let chunk_files = writer::write_chunks(
            &self.storage,
            self.config.output_dir(),
            &result.chunks,
            locale,
        )
        .await?;

        let metadata_path = self.config.metadata_path();
        writer::write_metadata(&self.storage, metadata_path, &result.metadata).await?;

        println!();
        println!(
            "{}",
            messages::total_summary(
                locale,
                result.metadata.total_letters,
                result.metadata.chunks
            )
        );

        Ok(LoadSummary {
            chunk_files,
            metadata_path: metadata_path.to_path_buf(),
            metadata: result.metadata,
        })
    }
}
