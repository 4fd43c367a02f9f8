//! # Autolink Core
//!
//! Automatic hyperlinking over a document tree. Given a table of
//! `(pattern, target)` definitions, the first occurrence of each pattern in
//! plain prose becomes a link to its target.
//!
//! ## Components
//!
//! - [`DefinitionTable`]: validated, boundary-guarded, longest-first
//! - [`CandidateFilter`]: parallel pruning of definitions that cannot match
//! - [`TreeRewriter`]: splits text runs around matches and inserts links
//! - [`RedundancyReducer`]: keeps only the first link per target
//! - cleanup passes: [`SkippedSpanFlattening`], [`EmptyWrapperFlattening`],
//!   [`NestedLinkFlattening`]
//! - [`AutoLinker`]: the whole pipeline
//!
//! ## Example
//!
//! ```rust
//! use autolink_ast::{Document, Inline};
//! use autolink_core::{AutoLinker, AutoLinkerOptions, DefinitionTable};
//!
//! let table = DefinitionTable::build([("GAN", "/gan"), ("BigGAN", "/biggan")])?;
//! let linker = AutoLinker::new(table, AutoLinkerOptions::default())?;
//!
//! let doc = Document::paragraph(vec![Inline::text("BigGAN extends the GAN.")]);
//! let (_doc, report) = linker.link(doc);
//! assert_eq!(report.links_created, 2);
//! # Ok::<(), autolink_core::AutolinkError>(())
//! ```

#![warn(clippy::all)]

pub mod cleanup;
pub mod definition;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod reducer;
pub mod rewriter;
pub mod transform;

pub use cleanup::{EmptyWrapperFlattening, NestedLinkFlattening, SkippedSpanFlattening};
pub use definition::{guard_pattern, is_delimiter, Definition, DefinitionTable, BOUNDARY_CLASS};
pub use error::{AutolinkError, AutolinkResult, TableError, TableResult};
pub use filter::{normalize_target, CandidateFilter, FilterOptions};
pub use pipeline::{AutoLinker, AutoLinkerOptions, LinkReport};
pub use reducer::{RedundancyReducer, SeenTargets, LINK_AUTO_FIRST_CLASS, LINK_AUTO_SKIPPED_CLASS};
pub use rewriter::{match_text, MatchResult, RewriterOptions, TreeRewriter, LINK_AUTO_CLASS};
pub use transform::TreeTransform;
