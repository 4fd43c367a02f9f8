//! Redundancy reducer
//!
//! Only the first auto-generated link to a given target, in reading order,
//! stays a link. Later ones become plain spans marked as skipped, which the
//! cleanup pass then dissolves into the surrounding text.

use crate::rewriter::LINK_AUTO_CLASS;
use crate::transform::TreeTransform;
use autolink_ast::{map_inline_sequences, Attr, Document, Inline};
use std::collections::HashSet;

/// Added to the first auto-generated link for each target
pub const LINK_AUTO_FIRST_CLASS: &str = "link-auto-first";

/// Class of the span that replaces a repeat auto-generated link
pub const LINK_AUTO_SKIPPED_CLASS: &str = "link-auto-skipped";

/// Targets already given a primary link during one traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenTargets {
    targets: HashSet<String>,
}

impl SeenTargets {
    /// Record `target`; true when this is its first occurrence
    pub fn first_visit(&mut self, target: &str) -> bool {
        if self.targets.contains(target) {
            false
        } else {
            self.targets.insert(target.to_string());
            true
        }
    }

    /// Number of distinct targets seen
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True before any target was recorded
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Demotes repeat auto-generated links
#[derive(Debug, Clone, Copy, Default)]
pub struct RedundancyReducer;

impl RedundancyReducer {
    /// Reduce `doc`, starting from and returning the seen-target state
    pub fn reduce(&self, doc: Document, mut seen: SeenTargets) -> (Document, SeenTargets) {
        let Document { meta, blocks } = doc;
        let blocks = map_inline_sequences(blocks, &mut |inlines, _| {
            reduce_inlines(inlines, &mut seen)
        });
        (Document { meta, blocks }, seen)
    }
}

impl TreeTransform for RedundancyReducer {
    fn name(&self) -> &'static str {
        "redundancy-reducer"
    }

    fn transform(&self, doc: Document) -> Document {
        self.reduce(doc, SeenTargets::default()).0
    }
}

/// Depth-first, left-to-right pass over one inline sequence
pub fn reduce_inlines(inlines: Vec<Inline>, seen: &mut SeenTargets) -> Vec<Inline> {
    inlines
        .into_iter()
        .map(|inline| reduce_inline(inline, seen))
        .collect()
}

fn reduce_inline(inline: Inline, seen: &mut SeenTargets) -> Inline {
    match inline {
        Inline::Link {
            mut attr,
            content,
            target,
            title,
        } if attr.has_class(LINK_AUTO_CLASS) => {
            if seen.first_visit(&target) {
                attr.add_class(LINK_AUTO_FIRST_CLASS);
                Inline::Link {
                    attr,
                    content,
                    target,
                    title,
                }
            } else {
                Inline::span(Attr::with_class(LINK_AUTO_SKIPPED_CLASS), content)
            }
        }
        Inline::Span { attr, content } => Inline::Span {
            attr,
            content: reduce_inlines(content, seen),
        },
        Inline::Emph(content) => Inline::Emph(reduce_inlines(content, seen)),
        Inline::Strong(content) => Inline::Strong(reduce_inlines(content, seen)),
        other => other,
    }
}
