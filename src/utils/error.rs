use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Cannot read input file {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {}: {source}", path.display())]
    InputMalformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot load configuration {}: {message}", path.display())]
    ConfigParseError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::InputNotFound { .. }
            | EtlError::InputUnreadable { .. }
            | EtlError::InputMalformed { .. } => ErrorCategory::Input,
            EtlError::OutputDirectory { .. } | EtlError::OutputWrite { .. } => {
                ErrorCategory::Output
            }
            EtlError::InvalidConfigValueError { .. } | EtlError::ConfigParseError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error; never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::InputNotFound { .. } => {
                "Check --input-path and --base-dir; relative paths resolve against the base directory".to_string()
            }
            EtlError::InputUnreadable { .. } => {
                "Check the file permissions of the input CSV".to_string()
            }
            EtlError::InputMalformed { source, .. } => match source.position() {
                Some(pos) => format!(
                    "Fix the CSV near line {}; every row needs as many columns as the header",
                    pos.line()
                ),
                None => "Make sure the input is UTF-8 CSV with a header row".to_string(),
            },
            EtlError::OutputDirectory { .. } => {
                "Check that the output location is writable and not an existing file".to_string()
            }
            EtlError::OutputWrite { .. } => {
                "Check free disk space and write permissions; files written before the failure are kept".to_string()
            }
            EtlError::SerializationError(_) => "Report this as a bug".to_string(),
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            EtlError::ConfigParseError { .. } => {
                "Make sure the file exists and is valid TOML".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not load letters: {}", self),
            ErrorCategory::Output => format!("Could not write chunks: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
