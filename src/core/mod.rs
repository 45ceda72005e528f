pub mod chunker;
pub mod etl;
pub mod loader;
pub mod pipeline;
pub mod writer;

pub use crate::domain::model::{Chunk, ChunkResult, Dataset, LoadSummary, Metadata, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
