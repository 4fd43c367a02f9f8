//! Auto-linking pipeline
//!
//! ## Phases
//!
//! 1. **Filter**: prune the definition table against the document's
//!    existing links and its flattened plain text
//! 2. **Rewrite**: insert a link for every match in every text run
//! 3. **Reduce**: keep the first link per target, demote the rest
//! 4. **Cleanup**: flatten demoted spans, empty wrappers and nested links
//!
//! The phases run sequentially on the calling thread; only the filter fans
//! out to its own worker pool. When the filter leaves no candidates the
//! document is returned untouched.

use crate::cleanup::{EmptyWrapperFlattening, NestedLinkFlattening, SkippedSpanFlattening};
use crate::definition::{Definition, DefinitionTable};
use crate::error::AutolinkResult;
use crate::filter::{CandidateFilter, FilterOptions};
use crate::reducer::{RedundancyReducer, SeenTargets, LINK_AUTO_SKIPPED_CLASS};
use crate::rewriter::{RewriterOptions, TreeRewriter, LINK_AUTO_CLASS};
use crate::transform::TreeTransform;
use autolink_ast::{extract_existing_targets, for_each_inline, render_plain_text, Document, Inline};
use autolink_config::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoLinkerOptions {
    /// Candidate filter tuning
    pub filter: FilterOptions,

    /// Tree rewriter settings
    pub rewriter: RewriterOptions,

    /// The site's own origin, stripped before target comparisons
    pub site_origin: Option<String>,
}

impl Default for AutoLinkerOptions {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for AutoLinkerOptions {
    fn from(engine: &EngineConfig) -> Self {
        Self {
            filter: FilterOptions::from(engine),
            rewriter: RewriterOptions {
                skip_headers: engine.skip_headers,
            },
            site_origin: engine.site_origin.clone(),
        }
    }
}

/// What one run did to a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    /// Definitions in the table
    pub definitions: usize,

    /// Definitions left after filtering
    pub candidates: usize,

    /// Auto-generated links in the output
    pub links_created: usize,

    /// Repeat matches demoted to plain text
    pub links_demoted: usize,
}

/// Runs the full pipeline with one definition table
pub struct AutoLinker {
    table: DefinitionTable,
    filter: CandidateFilter,
    rewriter: TreeRewriter,
    reducer: RedundancyReducer,
    cleanup: Vec<Box<dyn TreeTransform>>,
    site_origin: Option<String>,
}

impl std::fmt::Debug for AutoLinker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoLinker")
            .field("definitions", &self.table.len())
            .field("filter", &self.filter)
            .field("rewriter", &self.rewriter)
            .field("site_origin", &self.site_origin)
            .finish_non_exhaustive()
    }
}

impl AutoLinker {
    /// Create a pipeline around an already validated table
    pub fn new(table: DefinitionTable, options: AutoLinkerOptions) -> AutolinkResult<Self> {
        let filter = CandidateFilter::new(options.filter)?;
        Ok(Self {
            table,
            filter,
            rewriter: TreeRewriter::new(options.rewriter),
            reducer: RedundancyReducer,
            cleanup: vec![
                Box::new(SkippedSpanFlattening),
                Box::new(EmptyWrapperFlattening),
                Box::new(NestedLinkFlattening),
            ],
            site_origin: options.site_origin,
        })
    }

    /// The definition table in priority order
    pub fn table(&self) -> &DefinitionTable {
        &self.table
    }

    /// Definitions that may link somewhere in `doc`, in priority order.
    ///
    /// `page_target` is the document's own target, if it has one; it is
    /// treated like a link the document already contains.
    pub fn candidates(&self, doc: &Document, page_target: Option<&str>) -> Vec<&Definition> {
        let mut existing = extract_existing_targets(doc);
        existing.extend(page_target.map(str::to_string));
        let plain = render_plain_text(doc);

        self.filter
            .prune(&self.table, &existing, &plain, self.site_origin.as_deref())
    }

    /// Link a document that is not itself a target
    pub fn link(&self, doc: Document) -> (Document, LinkReport) {
        self.run(doc, None)
    }

    /// Link the page at `page_target`, never linking the page to itself
    pub fn link_page(&self, doc: Document, page_target: &str) -> (Document, LinkReport) {
        self.run(doc, Some(page_target))
    }

    fn run(&self, doc: Document, page_target: Option<&str>) -> (Document, LinkReport) {
        let mut report = LinkReport {
            definitions: self.table.len(),
            ..LinkReport::default()
        };

        let candidates = self.candidates(&doc, page_target);
        report.candidates = candidates.len();
        if candidates.is_empty() {
            debug!(definitions = report.definitions, "no candidates, document unchanged");
            return (doc, report);
        }

        let auto_before = count_auto_links(&doc);
        let doc = self.rewriter.rewrite(doc, &candidates);
        debug!(
            links = count_auto_links(&doc).saturating_sub(auto_before),
            "rewrite complete"
        );

        let (doc, seen) = self.reducer.reduce(doc, SeenTargets::default());
        report.links_demoted = count_skipped_spans(&doc);
        debug!(
            pass = self.reducer.name(),
            targets = seen.len(),
            demoted = report.links_demoted,
            "reduction complete"
        );

        let doc = self.cleanup.iter().fold(doc, |doc, pass| {
            debug!(pass = pass.name(), "running cleanup pass");
            pass.transform(doc)
        });
        report.links_created = count_auto_links(&doc).saturating_sub(auto_before);

        info!(
            definitions = report.definitions,
            candidates = report.candidates,
            links_created = report.links_created,
            links_demoted = report.links_demoted,
            "auto-linking complete"
        );
        (doc, report)
    }
}

fn count_auto_links(doc: &Document) -> usize {
    count_inlines(doc, |inline| {
        matches!(inline, Inline::Link { attr, .. } if attr.has_class(LINK_AUTO_CLASS))
    })
}

fn count_skipped_spans(doc: &Document) -> usize {
    count_inlines(doc, |inline| {
        matches!(inline, Inline::Span { attr, .. } if attr.has_class(LINK_AUTO_SKIPPED_CLASS))
    })
}

fn count_inlines(doc: &Document, predicate: impl Fn(&Inline) -> bool) -> usize {
    let mut count = 0;
    for_each_inline(&doc.blocks, &mut |inline| {
        if predicate(inline) {
            count += 1;
        }
    });
    count
}
