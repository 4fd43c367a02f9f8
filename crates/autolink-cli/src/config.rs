//! Settings resolution: config file, then command-line overrides

use anyhow::{bail, Context, Result};
use autolink_config::{AutolinkConfig, ConfigLoader};
use autolink_core::DefinitionTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "autolink.toml";

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub definitions: Option<PathBuf>,
    pub parallelism: Option<usize>,
    pub site_origin: Option<String>,
    pub skip_headers: bool,
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub autolink: AutolinkConfig,
}

impl CliConfig {
    /// Load the config file (explicit path, or `autolink.toml` if present,
    /// or defaults) and apply overrides on top.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut autolink = match path {
            Some(path) => ConfigLoader::load_from_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                ConfigLoader::load_from_file(DEFAULT_CONFIG_FILE)
                    .with_context(|| format!("Failed to load config '{DEFAULT_CONFIG_FILE}'"))?
            }
            None => {
                debug!("no config file, using defaults");
                AutolinkConfig::default()
            }
        };

        if let Some(definitions) = overrides.definitions {
            autolink.definitions = Some(definitions);
        }
        if let Some(parallelism) = overrides.parallelism {
            autolink.engine.parallelism = Some(parallelism);
        }
        if let Some(origin) = overrides.site_origin {
            autolink.engine.site_origin = Some(origin);
        }
        if overrides.skip_headers {
            autolink.engine.skip_headers = true;
        }

        Ok(Self { autolink })
    }

    /// Load, filter and validate the definition table
    pub fn load_table(&self) -> Result<DefinitionTable> {
        let Some(path) = self.autolink.definitions.as_deref() else {
            bail!("No definitions file given (use --definitions or set `definitions` in the config)");
        };

        let pairs = ConfigLoader::load_definitions(path)
            .with_context(|| format!("Failed to load definitions '{}'", path.display()))?;
        let filter = self
            .autolink
            .pair_filter()
            .context("Invalid exclusion glob in config")?;

        let table = DefinitionTable::build_with_filter(pairs, &filter)
            .with_context(|| format!("Invalid definitions in '{}'", path.display()))?;
        info!(definitions = table.len(), path = %path.display(), "definition table ready");
        Ok(table)
    }
}
