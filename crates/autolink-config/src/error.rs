//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading settings or definition files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("unsupported file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    /// Exclusion glob failed to compile
    #[error("invalid exclusion glob: {0}")]
    InvalidGlob(#[from] globset::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Wrap an I/O error with the file it came from
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
