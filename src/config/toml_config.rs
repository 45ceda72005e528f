use crate::core::chunker::DEFAULT_CHUNK_SIZE;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::messages::{DEFAULT_LOCALE, SUPPORTED_LOCALES};
use crate::utils::validation::{validate_one_of, validate_path, validate_positive_number, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const DEFAULT_INPUT_PATH: &str = "_data/letters.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "data/chunks";
pub const DEFAULT_METADATA_PATH: &str = "data/metadata.json";

/// File-based configuration. Every section and key is optional; missing
/// values fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub chunking: ChunkingConfig,
    pub load: LoadConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub input_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_dir: PathBuf,
    pub metadata_path: PathBuf,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            metadata_path: PathBuf::from(DEFAULT_METADATA_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub locale: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl TomlConfig {
    /// Load and parse a TOML file. Errors carry the file's path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| EtlError::ConfigParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            EtlError::ConfigParseError { message, .. } => EtlError::ConfigParseError {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigParseError {
            path: PathBuf::from("<inline>"),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expand `${VAR}` from the environment; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &Path {
        &self.source.input_path
    }

    fn output_dir(&self) -> &Path {
        &self.load.output_dir
    }

    fn metadata_path(&self) -> &Path {
        &self.load.metadata_path
    }

    fn chunk_size(&self) -> usize {
        self.chunking.chunk_size
    }

    fn locale(&self) -> &str {
        &self.output.locale
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_config(self)
    }
}

/// Checks shared by every config source.
pub fn validate_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("input_path", config.input_path())?;
    validate_path("output_dir", config.output_dir())?;
    validate_path("metadata_path", config.metadata_path())?;
    validate_positive_number("chunk_size", config.chunk_size(), 1)?;
    validate_one_of("locale", config.locale(), SUPPORTED_LOCALES)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
input_path = "raw/brev.csv"

[chunking]
chunk_size = 250

[load]
output_dir = "public/chunks"
metadata_path = "public/metadata.json"

[output]
locale = "nb"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), Path::new("raw/brev.csv"));
        assert_eq!(config.chunk_size(), 250);
        assert_eq!(config.output_dir(), Path::new("public/chunks"));
        assert_eq!(config.metadata_path(), Path::new("public/metadata.json"));
        assert_eq!(config.locale(), "nb");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.input_path(), Path::new(DEFAULT_INPUT_PATH));
        assert_eq!(config.output_dir(), Path::new(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.metadata_path(), Path::new(DEFAULT_METADATA_PATH));
        assert_eq!(config.chunk_size(), 1000);
        assert_eq!(config.locale(), "en");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = TomlConfig::from_toml_str("[load]\noutput_dir = \"out\"\n").unwrap();
        assert_eq!(config.output_dir(), Path::new("out"));
        assert_eq!(config.metadata_path(), Path::new(DEFAULT_METADATA_PATH));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LETTERS_CHUNKER_TEST_INPUT", "imports/letters.csv");

        let toml_content = r#"
[source]
input_path = "${LETTERS_CHUNKER_TEST_INPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), Path::new("imports/letters.csv"));

        std::env::remove_var("LETTERS_CHUNKER_TEST_INPUT");
    }

    #[test]
    fn test_unknown_env_var_left_untouched() {
        let toml_content = r#"
[source]
input_path = "${LETTERS_CHUNKER_SURELY_UNSET}/letters.csv"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.input_path(),
            Path::new("${LETTERS_CHUNKER_SURELY_UNSET}/letters.csv")
        );
    }

    #[test]
    fn test_config_validation() {
        let zero = TomlConfig::from_toml_str("[chunking]\nchunk_size = 0\n").unwrap();
        assert!(zero.validate().is_err());

        let locale = TomlConfig::from_toml_str("[output]\nlocale = \"de\"\n").unwrap();
        assert!(locale.validate().is_err());

        let empty_path = TomlConfig::from_toml_str("[source]\ninput_path = \"\"\n").unwrap();
        assert!(empty_path.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = TomlConfig::from_toml_str("[chunking\nchunk_size = ").unwrap_err();
        assert!(matches!(err, EtlError::ConfigParseError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[chunking]\nchunk_size = 50\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.chunk_size(), 50);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        match err {
            EtlError::ConfigParseError { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.toml"))
            }
            other => panic!("expected ConfigParseError, got {other:?}"),
        }
    }
}
