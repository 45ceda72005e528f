pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// Command-line options. Path options other than `--base-dir` and `--config`
/// are resolved against the base directory, not the shell's working
/// directory.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "letters-chunker")]
#[command(about = "Split a letters CSV into paginated JSON chunks plus a metadata file")]
pub struct CliConfig {
    /// Directory relative paths resolve against [default: the executable's
    /// directory, which is target/debug or target/release under cargo run]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// TOML configuration file; explicit flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source CSV [default: _data/letters.csv]
    #[arg(long)]
    pub input_path: Option<PathBuf>,

    /// Directory for letters-chunk-NN.json files [default: data/chunks]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Metadata file [default: data/metadata.json]
    #[arg(long)]
    pub metadata_path: Option<PathBuf>,

    /// Letters per chunk file [default: 1000]
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Language of console messages (en, nb) [default: en]
    #[arg(long)]
    pub locale: Option<String>,

    /// Load and chunk, print the plan, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Log CPU and memory usage after each stage
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// The directory every relative input/output path is joined onto.
    pub fn base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }

        let exe = std::env::current_exe().map_err(|e| EtlError::InvalidConfigValueError {
            field: "base_dir".to_string(),
            value: String::new(),
            reason: format!("cannot locate the running executable: {}", e),
        })?;

        exe.parent()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| EtlError::InvalidConfigValueError {
                field: "base_dir".to_string(),
                value: exe.display().to_string(),
                reason: "executable has no parent directory".to_string(),
            })
    }

    /// Merge defaults, the optional TOML file and explicit flags, in that
    /// order of precedence (flags win).
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(path) = &self.input_path {
            settings.source.input_path = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.load.output_dir = dir.clone();
        }
        if let Some(path) = &self.metadata_path {
            settings.load.metadata_path = path.clone();
        }
        if let Some(size) = self.chunk_size {
            settings.chunking.chunk_size = size;
        }
        if let Some(locale) = &self.locale {
            settings.output.locale = locale.clone();
        }

        Ok(settings)
    }
}
