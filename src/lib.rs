rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{etl::EtlEngine, pipeline::ChunkPipeline};
pub use crate::domain::model::{Chunk, Metadata, Record};
pub use crate::utils::error::{EtlError, Result};
