use crate::core::{ChunkResult, LoadSummary, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extract and transform only; nothing is written.
    pub async fn plan(&self) -> Result<ChunkResult> {
        tracing::info!("Loading letters...");
        let dataset = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} letters with {} fields",
            dataset.records.len(),
            dataset.fields.len()
        );
        self.monitor.log_stats("Load");

        tracing::info!("Chunking letters...");
        let result = self.pipeline.transform(dataset).await?;
        tracing::info!("Prepared {} chunks", result.chunks.len());
        self.monitor.log_stats("Chunk");

        Ok(result)
    }

    pub async fn run(&self) -> Result<LoadSummary> {
        let result = self.plan().await?;

        tracing::info!("Writing chunks...");
        let summary = self.pipeline.load(result).await?;
        tracing::info!(
            "Wrote {} chunk files and {}",
            summary.chunk_files.len(),
            summary.metadata_path.display()
        );
        self.monitor.log_stats("Write");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}
