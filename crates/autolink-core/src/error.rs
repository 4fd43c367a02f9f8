//! Engine error types

use autolink_config::ConfigError;
use thiserror::Error;

/// Authoring errors found while building the definition table.
///
/// Every variant is fatal: a table with duplicates would produce
/// contradictory or order-dependent link targets, so no document may be
/// processed with it.
#[derive(Debug, Error)]
pub enum TableError {
    /// Two pairs share the same pattern text
    #[error("duplicate pattern '{pattern}' (targets '{first_target}' and '{second_target}')")]
    DuplicatePattern {
        /// Repeated pattern text
        pattern: String,
        /// Target of the first occurrence
        first_target: String,
        /// Target of the repeat
        second_target: String,
    },

    /// Two pairs share the same target reference
    #[error("duplicate target '{target}' (patterns '{first_pattern}' and '{second_pattern}')")]
    DuplicateTarget {
        /// Repeated target reference
        target: String,
        /// Pattern of the first occurrence
        first_pattern: String,
        /// Pattern of the repeat
        second_pattern: String,
    },

    /// Pattern text is not a valid regular expression
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Offending pattern text
        pattern: String,
        /// Compiler error
        #[source]
        source: regex::Error,
    },
}

/// Result type for table construction
pub type TableResult<T> = Result<T, TableError>;

impl TableError {
    /// Pattern text the error is about
    pub fn pattern(&self) -> &str {
        match self {
            Self::DuplicatePattern { pattern, .. } | Self::InvalidPattern { pattern, .. } => {
                pattern
            }
            Self::DuplicateTarget { second_pattern, .. } => second_pattern,
        }
    }
}

/// Top-level engine error
#[derive(Debug, Error)]
pub enum AutolinkError {
    /// Definition table could not be built
    #[error("definition table: {0}")]
    Table(#[from] TableError),

    /// Candidate filter worker pool could not start
    #[error("failed to start filter worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Settings could not be loaded
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for engine operations
pub type AutolinkResult<T> = Result<T, AutolinkError>;

impl AutolinkError {
    /// Authoring errors abort the run; nothing else is classified fatal
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}
