//! Whole-tree transform seam
//!
//! Every pass that runs after the rewrite implements [`TreeTransform`], so
//! the pipeline can hold them as an ordered list.

use autolink_ast::Document;

/// A pure document-to-document pass
pub trait TreeTransform: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Apply the pass
    fn transform(&self, doc: Document) -> Document;
}
