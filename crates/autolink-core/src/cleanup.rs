//! Structural cleanup passes
//!
//! All three are pure and stateless. Each one only ever replaces a node by a
//! strictly smaller subtree, so applying a pass twice is the same as
//! applying it once.

use crate::reducer::LINK_AUTO_SKIPPED_CLASS;
use crate::transform::TreeTransform;
use autolink_ast::{
    inline_plain_text, map_inline_sequences, rewrite_all_inlines, rewrite_blocks_deep, Block,
    Document, Inline, Rewrite,
};

/// Splices demoted-link spans back into their parent sequence, then joins
/// the text nodes that end up adjacent, so a demoted occurrence reads as
/// ordinary prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkippedSpanFlattening;

impl TreeTransform for SkippedSpanFlattening {
    fn name(&self) -> &'static str {
        "skipped-span-flattening"
    }

    fn transform(&self, doc: Document) -> Document {
        let Document { meta, blocks } = doc;
        let blocks = rewrite_all_inlines(blocks, &mut |inline| match inline {
            Inline::Span { attr, content } if attr.has_class(LINK_AUTO_SKIPPED_CLASS) => {
                Rewrite::Splice(content)
            }
            other => Rewrite::Keep(other),
        });
        let blocks = map_inline_sequences(blocks, &mut |inlines, _| coalesce_text(inlines));
        Document { meta, blocks }
    }
}

/// Join adjacent `Text` nodes at every nesting level
pub fn coalesce_text(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        match inline {
            Inline::Text(text) if text.is_empty() => {}
            Inline::Text(text) => {
                if let Some(Inline::Text(last)) = out.last_mut() {
                    last.push_str(&text);
                } else {
                    out.push(Inline::Text(text));
                }
            }
            Inline::Span { attr, content } => out.push(Inline::Span {
                attr,
                content: coalesce_text(content),
            }),
            Inline::Emph(content) => out.push(Inline::Emph(coalesce_text(content))),
            Inline::Strong(content) => out.push(Inline::Strong(coalesce_text(content))),
            Inline::Link {
                attr,
                content,
                target,
                title,
            } => out.push(Inline::Link {
                attr,
                content: coalesce_text(content),
                target,
                title,
            }),
            Inline::Image {
                attr,
                alt,
                target,
                title,
            } => out.push(Inline::Image {
                attr,
                alt: coalesce_text(alt),
                target,
                title,
            }),
            other => out.push(other),
        }
    }
    out
}

/// Replaces attribute-less containers with their payload: `Div` at block
/// level and `Span` at inline level. Containers with an id, class or
/// key-value attribute are kept. Text left adjacent by a splice is joined.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWrapperFlattening;

impl TreeTransform for EmptyWrapperFlattening {
    fn name(&self) -> &'static str {
        "empty-wrapper-flattening"
    }

    fn transform(&self, doc: Document) -> Document {
        let Document { meta, blocks } = doc;
        let blocks = rewrite_blocks_deep(blocks, &mut |block| match block {
            Block::Div { attr, content } if attr.is_empty() => Rewrite::Splice(content),
            other => Rewrite::Keep(other),
        });
        let blocks = rewrite_all_inlines(blocks, &mut |inline| match inline {
            Inline::Span { attr, content } if attr.is_empty() => Rewrite::Splice(content),
            other => Rewrite::Keep(other),
        });
        let blocks = map_inline_sequences(blocks, &mut |inlines, _| coalesce_text(inlines));
        Document { meta, blocks }
    }
}

/// Reduces any link found inside another link's payload to plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedLinkFlattening;

impl TreeTransform for NestedLinkFlattening {
    fn name(&self) -> &'static str {
        "nested-link-flattening"
    }

    fn transform(&self, doc: Document) -> Document {
        let Document { meta, blocks } = doc;
        let blocks = rewrite_all_inlines(blocks, &mut |inline| match inline {
            Inline::Link {
                attr,
                content,
                target,
                title,
            } if content.iter().any(contains_link) => Rewrite::Replace(Inline::Link {
                attr,
                content: unlink(content),
                target,
                title,
            }),
            other => Rewrite::Keep(other),
        });
        Document { meta, blocks }
    }
}

/// True when `inline` is, or transitively contains, a link
pub fn contains_link(inline: &Inline) -> bool {
    inline.is_link()
        || inline
            .children()
            .is_some_and(|children| children.iter().any(contains_link))
}

fn unlink(inlines: Vec<Inline>) -> Vec<Inline> {
    inlines
        .into_iter()
        .map(|inline| match inline {
            Inline::Link { content, .. } => Inline::Text(inline_plain_text(&content)),
            Inline::Span { attr, content } => Inline::Span {
                attr,
                content: unlink(content),
            },
            Inline::Emph(content) => Inline::Emph(unlink(content)),
            Inline::Strong(content) => Inline::Strong(unlink(content)),
            Inline::Image {
                attr,
                alt,
                target,
                title,
            } => Inline::Image {
                attr,
                alt: unlink(alt),
                target,
                title,
            },
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use autolink_ast::Attr;

    fn skipped(text: &str) -> Inline {
        Inline::span(Attr::with_class(LINK_AUTO_SKIPPED_CLASS), vec![Inline::text(text)])
    }

    #[test]
    fn test_skipped_spans_become_prose() {
        let doc = Document::paragraph(vec![
            Inline::link(vec![Inline::text("GAN")], "/gan"),
            Inline::text(" "),
            skipped("GAN"),
            Inline::text(" "),
            skipped("GAN"),
        ]);

        let out = SkippedSpanFlattening.transform(doc);
        assert_eq!(
            out.blocks,
            vec![Block::Para(vec![
                Inline::link(vec![Inline::text("GAN")], "/gan"),
                Inline::text(" GAN GAN"),
            ])]
        );
    }

    #[test]
    fn test_other_spans_kept() {
        let styled = Inline::span(Attr::with_class("smallcaps"), vec![Inline::text("x")]);
        let doc = Document::paragraph(vec![styled.clone()]);
        assert_eq!(SkippedSpanFlattening.transform(doc.clone()), doc);
    }

    #[test]
    fn test_empty_divs_spliced_and_classed_divs_kept() {
        let para = Block::Para(vec![Inline::text("x")]);
        let classed = Block::div(Attr::with_class("note"), vec![para.clone()]);
        let doc = Document::new(vec![
            Block::div(Attr::default(), vec![Block::div(Attr::default(), vec![para.clone()])]),
            classed.clone(),
        ]);

        let out = EmptyWrapperFlattening.transform(doc);
        assert_eq!(out.blocks, vec![para, classed]);
    }

    #[test]
    fn test_empty_spans_spliced() {
        let doc = Document::paragraph(vec![Inline::span(
            Attr::default(),
            vec![Inline::text("a")],
        )]);
        let out = EmptyWrapperFlattening.transform(doc);
        assert_eq!(out, Document::paragraph(vec![Inline::text("a")]));
    }

    #[test]
    fn test_nested_link_reduced_to_text() {
        let inner = Inline::link(
            vec![Inline::text("Big"), Inline::Space, Inline::text("GAN")],
            "/inner",
        );
        let doc = Document::paragraph(vec![Inline::link(
            vec![
                Inline::text("see "),
                Inline::Emph(vec![inner]),
            ],
            "/outer",
        )]);

        let out = NestedLinkFlattening.transform(doc);
        assert_eq!(
            out,
            Document::paragraph(vec![Inline::link(
                vec![
                    Inline::text("see "),
                    Inline::Emph(vec![Inline::text("Big GAN")]),
                ],
                "/outer",
            )])
        );
    }

    #[test]
    fn test_passes_are_idempotent_on_example() {
        let doc = Document::new(vec![Block::div(
            Attr::default(),
            vec![Block::Para(vec![Inline::text("a "), skipped("b"), Inline::text(" c")])],
        )]);

        let passes: [&dyn TreeTransform; 2] = [&SkippedSpanFlattening, &EmptyWrapperFlattening];
        let once = passes.iter().fold(doc, |doc, pass| pass.transform(doc));
        let twice = passes.iter().fold(once.clone(), |doc, pass| pass.transform(doc));
        assert_eq!(once, twice);
        assert_eq!(once, Document::paragraph(vec![Inline::text("a b c")]));
    }
}
