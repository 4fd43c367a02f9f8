//! Settings and definition-file loading
//!
//! Both kinds of file are read as TOML or JSON depending on the extension.
//! Definition files hold `(pattern, target)` pairs:
//!
//! ```toml
//! [[definition]]
//! pattern = "BigGAN"
//! target = "https://arxiv.org/abs/1809.11096"
//! ```
//!
//! or, as JSON, an array whose entries are either `["pattern", "target"]`
//! or `{ "pattern": ..., "target": ... }`.

use crate::config::AutolinkConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One authored `(pattern, target)` pair, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDefinition {
    /// Regular-expression text of the pattern
    pub pattern: String,

    /// Link destination
    pub target: String,
}

impl RawDefinition {
    /// Convenience constructor
    pub fn new(pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
        }
    }
}

impl From<(&str, &str)> for RawDefinition {
    fn from((pattern, target): (&str, &str)) -> Self {
        Self::new(pattern, target)
    }
}

#[derive(Debug, Deserialize)]
struct TomlDefinitions {
    #[serde(default)]
    definition: Vec<RawDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonEntry {
    Pair(String, String),
    Object(RawDefinition),
}

impl From<JsonEntry> for RawDefinition {
    fn from(entry: JsonEntry) -> Self {
        match entry {
            JsonEntry::Pair(pattern, target) => Self { pattern, target },
            JsonEntry::Object(definition) => definition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    fn detect(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reads configuration and definitions from disk
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a `.toml` or `.json` file
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<AutolinkConfig> {
        let path = path.as_ref();
        let format = FileFormat::detect(path)?;
        let content = read(path)?;
        let config = Self::parse(&content, format)?;
        debug!(path = %path.display(), "loaded autolink config");
        Ok(config)
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<AutolinkConfig> {
        Self::parse(content, FileFormat::Toml)
    }

    /// Load definition pairs from a `.toml` or `.json` file, in file order
    pub fn load_definitions(path: impl AsRef<Path>) -> ConfigResult<Vec<RawDefinition>> {
        let path = path.as_ref();
        let format = FileFormat::detect(path)?;
        let content = read(path)?;
        let definitions = match format {
            FileFormat::Toml => Self::definitions_from_toml_str(&content)?,
            FileFormat::Json => Self::definitions_from_json_str(&content)?,
        };
        debug!(
            path = %path.display(),
            count = definitions.len(),
            "loaded definition pairs"
        );
        Ok(definitions)
    }

    /// Parse `[[definition]]` tables
    pub fn definitions_from_toml_str(content: &str) -> ConfigResult<Vec<RawDefinition>> {
        let file: TomlDefinitions = toml::from_str(content)?;
        Ok(file.definition)
    }

    /// Parse a JSON array of pairs or objects
    pub fn definitions_from_json_str(content: &str) -> ConfigResult<Vec<RawDefinition>> {
        let entries: Vec<JsonEntry> = serde_json::from_str(content)?;
        Ok(entries.into_iter().map(RawDefinition::from).collect())
    }

    fn parse<T: DeserializeOwned>(content: &str, format: FileFormat) -> ConfigResult<T> {
        match format {
            FileFormat::Toml => Ok(toml::from_str(content)?),
            FileFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
}
