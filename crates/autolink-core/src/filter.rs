//! Candidate filter
//!
//! Discards definitions that cannot produce a link in a given document,
//! before the comparatively expensive tree rewrite:
//!
//! 1. **Self-link suppression**: a definition whose target the document
//!    already links to (or the page's own target) is dropped.
//! 2. **Plain-text rejection**: a definition whose guarded pattern does not
//!    match the document's flattened text cannot match any text run in it.
//!
//! Step 2 is a divide-and-conquer search. A sublist is tested once with the
//! alternation of all its patterns; if that fails the whole sublist is
//! dropped, otherwise it is split into chunks searched in parallel. The
//! top-level list is never tested as a whole.

use crate::definition::{pad, Definition, DefinitionTable};
use crate::error::AutolinkResult;
use autolink_config::{EngineConfig, DEFAULT_MAX_ALTERNATION, DEFAULT_MIN_CHUNK};
use rayon::prelude::*;
use rayon::ThreadPool;
use regex::RegexBuilder;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Compiled-size ceiling for a combined alternation. A sublist whose
/// alternation exceeds it is treated as "may match" and split further.
const COMBINED_SIZE_LIMIT: usize = 64 * (1 << 20);

/// Candidate filter tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Worker threads (1 gives a fully deterministic, single-threaded run)
    pub parallelism: usize,

    /// Sublists longer than this are split without a combined test
    pub max_alternation: usize,

    /// Preferred smallest chunk
    pub min_chunk: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for FilterOptions {
    fn from(engine: &EngineConfig) -> Self {
        Self {
            parallelism: engine.effective_parallelism(),
            max_alternation: engine.max_alternation.max(1),
            min_chunk: engine.min_chunk.max(1),
        }
    }
}

impl FilterOptions {
    /// Single worker, otherwise default bounds
    pub fn single_threaded() -> Self {
        Self {
            parallelism: 1,
            max_alternation: DEFAULT_MAX_ALTERNATION,
            min_chunk: DEFAULT_MIN_CHUNK,
        }
    }

    /// Chunk length for a sublist of `len > 1` items.
    ///
    /// Roughly one chunk per worker, never below `min_chunk`, and always
    /// short enough that the sublist splits into at least two chunks.
    fn chunk_len(&self, len: usize) -> usize {
        let per_worker = len.div_ceil(self.parallelism.max(2));
        per_worker.max(self.min_chunk).min(len.div_ceil(2)).max(1)
    }
}

/// Strip the site's own origin so absolute and root-relative forms of the
/// same page compare equal.
pub fn normalize_target<'a>(target: &'a str, site_origin: Option<&str>) -> &'a str {
    match site_origin.map(|origin| origin.trim_end_matches('/')) {
        Some(origin) if !origin.is_empty() => match target.strip_prefix(origin) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => target,
        },
        _ => target,
    }
}

/// Prunes a definition table against one document
pub struct CandidateFilter {
    options: FilterOptions,
    pool: ThreadPool,
}

impl std::fmt::Debug for CandidateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateFilter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl CandidateFilter {
    /// Start a worker pool sized to `options.parallelism`
    pub fn new(options: FilterOptions) -> AutolinkResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.parallelism.max(1))
            .thread_name(|i| format!("autolink-filter-{i}"))
            .build()?;
        Ok(Self { options, pool })
    }

    /// Definitions that may still link somewhere in the document, in table
    /// (priority) order.
    ///
    /// `existing` holds targets the document already links to; `plain` is
    /// the document's flattened text.
    pub fn prune<'t>(
        &self,
        table: &'t DefinitionTable,
        existing: &[String],
        plain: &str,
        site_origin: Option<&str>,
    ) -> Vec<&'t Definition> {
        let linked: HashSet<&str> = existing
            .iter()
            .map(|target| normalize_target(target, site_origin))
            .collect();

        let unlinked: Vec<(usize, &Definition)> = table
            .iter()
            .enumerate()
            .filter(|(_, def)| !linked.contains(normalize_target(def.target(), site_origin)))
            .collect();
        debug!(
            total = table.len(),
            suppressed = table.len() - unlinked.len(),
            "self-link suppression"
        );

        let mut kept = self.reject_unmatched(&unlinked, plain);
        kept.sort_unstable();
        debug!(candidates = kept.len(), "plain-text rejection");

        kept.into_iter().filter_map(|index| table.get(index)).collect()
    }

    /// Indices of the definitions whose pattern matches `plain`, in no
    /// particular order.
    pub fn reject_unmatched(&self, definitions: &[(usize, &Definition)], plain: &str) -> Vec<usize> {
        let padded = pad(plain);
        self.pool
            .install(|| self.search(definitions, &padded, true))
    }

    fn search(&self, items: &[(usize, &Definition)], padded: &str, top_level: bool) -> Vec<usize> {
        match items {
            [] => Vec::new(),
            [(index, def)] => {
                if def.is_match_padded(padded) {
                    vec![*index]
                } else {
                    Vec::new()
                }
            }
            _ => {
                if !top_level
                    && items.len() <= self.options.max_alternation
                    && combined_match(items, padded) == Some(false)
                {
                    trace!(len = items.len(), "sublist rejected by combined test");
                    return Vec::new();
                }

                let chunk = self.options.chunk_len(items.len());
                items
                    .par_chunks(chunk)
                    .map(|sub| self.search(sub, padded, false))
                    .reduce(Vec::new, |mut acc, sub| {
                        acc.extend(sub);
                        acc
                    })
            }
        }
    }
}

/// Test the alternation of every guarded pattern in `items`.
///
/// `None` when the alternation is too large to compile, in which case the
/// caller must assume it could match.
fn combined_match(items: &[(usize, &Definition)], padded: &str) -> Option<bool> {
    let alternation = items
        .iter()
        .map(|(_, def)| format!("(?:{})", def.regex().as_str()))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&alternation)
        .size_limit(COMBINED_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => Some(regex.is_match(padded)),
        Err(e) => {
            trace!(len = items.len(), error = %e, "combined alternation not compiled");
            None
        }
    }
}
