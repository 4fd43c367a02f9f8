//! Engine settings

use crate::error::ConfigResult;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default bound above which a sublist is split without a combined test
pub const DEFAULT_MAX_ALTERNATION: usize = 256;

/// Smallest sublist the candidate filter splits off
pub const DEFAULT_MIN_CHUNK: usize = 2;

/// Top-level configuration
///
/// ```toml
/// definitions = "definitions.toml"
///
/// [engine]
/// parallelism = 8
/// site_origin = "https://example.org"
///
/// [exclude]
/// targets = ["https://en.wikipedia.org/*"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutolinkConfig {
    /// Default definitions file, relative to the working directory
    pub definitions: Option<PathBuf>,

    /// Engine tuning
    pub engine: EngineConfig,

    /// Pairs removed before compilation
    pub exclude: ExcludeConfig,
}

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidate filter workers (`None` = number of CPUs)
    pub parallelism: Option<usize>,

    /// Sublists larger than this are split without a combined test
    pub max_alternation: usize,

    /// Smallest chunk the candidate filter splits off
    pub min_chunk: usize,

    /// Leave section headings unlinked (off by default)
    pub skip_headers: bool,

    /// Absolute-URL prefix of the site itself, stripped before comparing
    /// targets (so `https://example.org/foo` and `/foo` are the same page)
    pub site_origin: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallelism: None,
            max_alternation: DEFAULT_MAX_ALTERNATION,
            min_chunk: DEFAULT_MIN_CHUNK,
            skip_headers: false,
            site_origin: None,
        }
    }
}

impl EngineConfig {
    /// Worker count actually used, never zero
    pub fn effective_parallelism(&self) -> usize {
        self.parallelism.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Glob lists selecting pairs to drop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcludeConfig {
    /// Globs matched against target references
    pub targets: Vec<String>,

    /// Globs matched against pattern text
    pub patterns: Vec<String>,
}

impl AutolinkConfig {
    /// Compile the exclusion lists into a [`PairFilter`]
    pub fn pair_filter(&self) -> ConfigResult<PairFilter> {
        PairFilter::new(&self.exclude.targets, &self.exclude.patterns)
    }
}

/// Compiled exclusion globs; the subset function applied to the pair list
#[derive(Debug, Clone)]
pub struct PairFilter {
    targets: GlobSet,
    patterns: GlobSet,
}

impl PairFilter {
    /// Compile target and pattern globs
    pub fn new(targets: &[String], patterns: &[String]) -> ConfigResult<Self> {
        Ok(Self {
            targets: build_globset(targets)?,
            patterns: build_globset(patterns)?,
        })
    }

    /// Filter that keeps every pair
    pub fn allow_all() -> Self {
        Self {
            targets: GlobSet::empty(),
            patterns: GlobSet::empty(),
        }
    }

    /// True when neither the pattern nor the target is excluded
    pub fn allows(&self, pattern: &str, target: &str) -> bool {
        !self.targets.is_match(target) && !self.patterns.is_match(pattern)
    }
}

fn build_globset(globs: &[String]) -> ConfigResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        builder.add(Glob::new(glob)?);
    }
    Ok(builder.build()?)
}
