//! Definition table
//!
//! Raw `(pattern, target)` pairs are validated, compiled into
//! boundary-guarded regular expressions and ordered longest pattern first.
//! That order is the priority order everywhere downstream: a longer, more
//! specific pattern wins over a shorter one that would match inside it.

use crate::error::{TableError, TableResult};
use autolink_config::{PairFilter, RawDefinition};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Character class a pattern must be flanked by: punctuation, symbols or
/// whitespace.
pub const BOUNDARY_CLASS: &str = r"[\p{P}\p{S}\s]";

/// Blank added on each side of a text before matching, standing in for the
/// string start and end.
pub(crate) const SENTINEL: char = ' ';

static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{BOUNDARY_CLASS}$")).expect("delimiter regex"));

/// True when `c` may flank a pattern match
pub fn is_delimiter(c: char) -> bool {
    let mut buf = [0u8; 4];
    DELIMITER.is_match(c.encode_utf8(&mut buf))
}

/// Surround `text` with sentinel blanks
pub(crate) fn pad(text: &str) -> String {
    let mut padded = String::with_capacity(text.len() + 2);
    padded.push(SENTINEL);
    padded.push_str(text);
    padded.push(SENTINEL);
    padded
}

/// Wrap a pattern in the boundary guard
pub fn guard_pattern(pattern: &str) -> String {
    format!("{BOUNDARY_CLASS}(?:{pattern}){BOUNDARY_CLASS}")
}

/// A compiled pattern paired with its link target
#[derive(Debug, Clone)]
pub struct Definition {
    pattern_text: String,
    regex: Regex,
    target: String,
}

impl Definition {
    fn compile(raw: RawDefinition) -> TableResult<Self> {
        let regex = Regex::new(&guard_pattern(&raw.pattern)).map_err(|source| {
            TableError::InvalidPattern {
                pattern: raw.pattern.clone(),
                source,
            }
        })?;
        Ok(Self {
            pattern_text: raw.pattern,
            regex,
            target: raw.target,
        })
    }

    /// Pattern as authored
    pub fn pattern_text(&self) -> &str {
        &self.pattern_text
    }

    /// Boundary-guarded expression
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Link destination
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether the guarded pattern matches anywhere in an already padded text
    pub fn is_match_padded(&self, padded: &str) -> bool {
        self.regex.is_match(padded)
    }

    fn priority_len(&self) -> usize {
        self.pattern_text.chars().count()
    }
}

/// Validated definitions, longest pattern first. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    definitions: Vec<Definition>,
}

impl DefinitionTable {
    /// Validate and compile every pair
    pub fn build<I, D>(pairs: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<RawDefinition>,
    {
        Self::build_filtered(pairs, |_| true)
    }

    /// Validate every pair, drop the ones `keep` rejects, compile the rest.
    ///
    /// Duplicates are checked over the full list so that an authoring error
    /// is never hidden by an exclusion.
    pub fn build_filtered<I, D>(pairs: I, keep: impl Fn(&RawDefinition) -> bool) -> TableResult<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<RawDefinition>,
    {
        let raw: Vec<RawDefinition> = pairs.into_iter().map(Into::into).collect();
        validate(&raw)?;

        let total = raw.len();
        let mut definitions = raw
            .into_iter()
            .filter(|pair| keep(pair))
            .map(Definition::compile)
            .collect::<TableResult<Vec<_>>>()?;

        definitions.sort_by_key(|d| std::cmp::Reverse(d.priority_len()));

        debug!(
            total,
            compiled = definitions.len(),
            "built definition table"
        );
        Ok(Self { definitions })
    }

    /// Build with a configured exclusion filter
    pub fn build_with_filter<I, D>(pairs: I, filter: &PairFilter) -> TableResult<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<RawDefinition>,
    {
        Self::build_filtered(pairs, |pair| filter.allows(&pair.pattern, &pair.target))
    }

    /// Definitions in priority order
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Iterate in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, Definition> {
        self.definitions.iter()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when no definitions survived
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition at a priority index
    pub fn get(&self, index: usize) -> Option<&Definition> {
        self.definitions.get(index)
    }
}

impl<'a> IntoIterator for &'a DefinitionTable {
    type Item = &'a Definition;
    type IntoIter = std::slice::Iter<'a, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn validate(pairs: &[RawDefinition]) -> TableResult<()> {
    let mut by_pattern: HashMap<&str, &str> = HashMap::with_capacity(pairs.len());
    let mut by_target: HashMap<&str, &str> = HashMap::with_capacity(pairs.len());

    for pair in pairs {
        if let Some(first_target) = by_pattern.insert(&pair.pattern, &pair.target) {
            return Err(TableError::DuplicatePattern {
                pattern: pair.pattern.clone(),
                first_target: first_target.to_string(),
                second_target: pair.target.clone(),
            });
        }
        if let Some(first_pattern) = by_target.insert(&pair.target, &pair.pattern) {
            return Err(TableError::DuplicateTarget {
                target: pair.target.clone(),
                first_pattern: first_pattern.to_string(),
                second_pattern: pair.pattern.clone(),
            });
        }
    }
    Ok(())
}
