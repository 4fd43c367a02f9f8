//! Generic tree walks
//!
//! Passes never mutate a parent container in place. Each element of a
//! sequence is mapped to a [`Rewrite`] and the sequence is rebuilt by
//! concatenation, which is how a wrapper node gets replaced by its own
//! payload (a splice) without disturbing its siblings.

use crate::types::{Block, Inline};

/// Outcome of rewriting one element of a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite<T> {
    /// Element is kept as-is
    Keep(T),

    /// Element is replaced by a single new element
    Replace(T),

    /// Element is replaced by zero or more elements, spliced in place
    Splice(Vec<T>),
}

impl<T> Rewrite<T> {
    fn into_vec(self, out: &mut Vec<T>) {
        match self {
            Self::Keep(item) | Self::Replace(item) => out.push(item),
            Self::Splice(items) => out.extend(items),
        }
    }
}

/// Rewrite one sequence level, rebuilding it by concatenation
pub fn rewrite_seq<T>(seq: Vec<T>, mut f: impl FnMut(T) -> Rewrite<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(seq.len());
    for item in seq {
        f(item).into_vec(&mut out);
    }
    out
}

/// Which block an inline sequence belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineHost {
    Para,
    Plain,
    Header,
}

/// Apply `f` to every top-level inline sequence of `blocks`, in reading order.
///
/// Nested blocks (divs, quotes, list items) are descended into. Verbatim
/// blocks are left alone. The callback decides how to treat nested inlines.
pub fn map_inline_sequences(
    blocks: Vec<Block>,
    f: &mut dyn FnMut(Vec<Inline>, InlineHost) -> Vec<Inline>,
) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| map_inline_sequences_in_block(block, &mut *f))
        .collect()
}

fn map_inline_sequences_in_block(
    block: Block,
    f: &mut dyn FnMut(Vec<Inline>, InlineHost) -> Vec<Inline>,
) -> Block {
    match block {
        Block::Para(content) => Block::Para(f(content, InlineHost::Para)),
        Block::Plain(content) => Block::Plain(f(content, InlineHost::Plain)),
        Block::Header {
            level,
            attr,
            content,
        } => Block::Header {
            level,
            attr,
            content: f(content, InlineHost::Header),
        },
        Block::Div { attr, content } => Block::Div {
            attr,
            content: map_inline_sequences(content, f),
        },
        Block::BlockQuote(content) => Block::BlockQuote(map_inline_sequences(content, f)),
        Block::BulletList(items) => Block::BulletList(
            items
                .into_iter()
                .map(|item| map_inline_sequences(item, &mut *f))
                .collect(),
        ),
        Block::OrderedList(items) => Block::OrderedList(
            items
                .into_iter()
                .map(|item| map_inline_sequences(item, &mut *f))
                .collect(),
        ),
        verbatim @ (Block::CodeBlock { .. } | Block::RawBlock { .. } | Block::HorizontalRule) => {
            verbatim
        }
    }
}

/// Top-down rewrite of every inline sequence in `inlines`, including the
/// payloads of wrapper nodes.
///
/// The result of `f` is descended into; spliced elements are themselves
/// offered to `f` again, so a splice of a wrapper inside a wrapper is
/// flattened in one call.
pub fn rewrite_inlines_deep(
    inlines: Vec<Inline>,
    f: &mut dyn FnMut(Inline) -> Rewrite<Inline>,
) -> Vec<Inline> {
    let mut out = Vec::with_capacity(inlines.len());
    for inline in inlines {
        match f(inline) {
            Rewrite::Keep(inline) | Rewrite::Replace(inline) => {
                out.push(descend_inline(inline, f));
            }
            Rewrite::Splice(items) => out.extend(rewrite_inlines_deep(items, f)),
        }
    }
    out
}

fn descend_inline(inline: Inline, f: &mut dyn FnMut(Inline) -> Rewrite<Inline>) -> Inline {
    match inline {
        Inline::Span { attr, content } => Inline::Span {
            attr,
            content: rewrite_inlines_deep(content, f),
        },
        Inline::Emph(content) => Inline::Emph(rewrite_inlines_deep(content, f)),
        Inline::Strong(content) => Inline::Strong(rewrite_inlines_deep(content, f)),
        Inline::Link {
            attr,
            content,
            target,
            title,
        } => Inline::Link {
            attr,
            content: rewrite_inlines_deep(content, f),
            target,
            title,
        },
        Inline::Image {
            attr,
            alt,
            target,
            title,
        } => Inline::Image {
            attr,
            alt: rewrite_inlines_deep(alt, f),
            target,
            title,
        },
        leaf @ (Inline::Text(_)
        | Inline::Space
        | Inline::SoftBreak
        | Inline::LineBreak
        | Inline::Code { .. }
        | Inline::Raw { .. }) => leaf,
    }
}

/// Apply [`rewrite_inlines_deep`] to every inline sequence of `blocks`
pub fn rewrite_all_inlines(
    blocks: Vec<Block>,
    f: &mut dyn FnMut(Inline) -> Rewrite<Inline>,
) -> Vec<Block> {
    map_inline_sequences(blocks, &mut |inlines, _| rewrite_inlines_deep(inlines, &mut *f))
}

/// Top-down rewrite of a block sequence and every nested block sequence.
///
/// Same splice semantics as [`rewrite_inlines_deep`], one level up.
pub fn rewrite_blocks_deep(
    blocks: Vec<Block>,
    f: &mut dyn FnMut(Block) -> Rewrite<Block>,
) -> Vec<Block> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        match f(block) {
            Rewrite::Keep(block) | Rewrite::Replace(block) => out.push(descend_block(block, f)),
            Rewrite::Splice(items) => out.extend(rewrite_blocks_deep(items, f)),
        }
    }
    out
}

fn descend_block(block: Block, f: &mut dyn FnMut(Block) -> Rewrite<Block>) -> Block {
    match block {
        Block::Div { attr, content } => Block::Div {
            attr,
            content: rewrite_blocks_deep(content, f),
        },
        Block::BlockQuote(content) => Block::BlockQuote(rewrite_blocks_deep(content, f)),
        Block::BulletList(items) => Block::BulletList(
            items
                .into_iter()
                .map(|item| rewrite_blocks_deep(item, &mut *f))
                .collect(),
        ),
        Block::OrderedList(items) => Block::OrderedList(
            items
                .into_iter()
                .map(|item| rewrite_blocks_deep(item, &mut *f))
                .collect(),
        ),
        leaf @ (Block::Para(_)
        | Block::Plain(_)
        | Block::Header { .. }
        | Block::CodeBlock { .. }
        | Block::RawBlock { .. }
        | Block::HorizontalRule) => leaf,
    }
}

/// Visit every inline of `blocks` in document order (pre-order)
pub fn for_each_inline<'a>(blocks: &'a [Block], f: &mut dyn FnMut(&'a Inline)) {
    for block in blocks {
        match block {
            Block::Para(content) | Block::Plain(content) | Block::Header { content, .. } => {
                visit_inlines(content, f);
            }
            Block::Div { content, .. } | Block::BlockQuote(content) => {
                for_each_inline(content, f);
            }
            Block::BulletList(items) | Block::OrderedList(items) => {
                for item in items {
                    for_each_inline(item, f);
                }
            }
            Block::CodeBlock { .. } | Block::RawBlock { .. } | Block::HorizontalRule => {}
        }
    }
}

fn visit_inlines<'a>(inlines: &'a [Inline], f: &mut dyn FnMut(&'a Inline)) {
    for inline in inlines {
        f(inline);
        if let Some(children) = inline.children() {
            visit_inlines(children, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attr;

    #[test]
    fn test_rewrite_seq_splice_and_drop() {
        let out = rewrite_seq(vec![1, 2, 3, 4], |n| match n {
            2 => Rewrite::Splice(vec![20, 21]),
            3 => Rewrite::Splice(vec![]),
            4 => Rewrite::Replace(40),
            n => Rewrite::Keep(n),
        });
        assert_eq!(out, vec![1, 20, 21, 40]);
    }

    #[test]
    fn test_rewrite_inlines_deep_flattens_nested_splices() {
        let marked = |content| Inline::span(Attr::with_class("x"), content);
        let inlines = vec![
            Inline::text("a"),
            marked(vec![marked(vec![Inline::text("b")]), Inline::text("c")]),
        ];

        let out = rewrite_inlines_deep(inlines, &mut |inline| match inline {
            Inline::Span { attr, content } if attr.has_class("x") => Rewrite::Splice(content),
            other => Rewrite::Keep(other),
        });

        assert_eq!(
            out,
            vec![Inline::text("a"), Inline::text("b"), Inline::text("c")]
        );
    }

    #[test]
    fn test_map_inline_sequences_reports_host() {
        let blocks = vec![
            Block::Header {
                level: 1,
                attr: Attr::default(),
                content: vec![Inline::text("h")],
            },
            Block::BlockQuote(vec![Block::Para(vec![Inline::text("p")])]),
            Block::CodeBlock {
                attr: Attr::default(),
                text: "c".into(),
            },
        ];

        let mut hosts = Vec::new();
        map_inline_sequences(blocks, &mut |inlines, host| {
            hosts.push(host);
            inlines
        });
        assert_eq!(hosts, vec![InlineHost::Header, InlineHost::Para]);
    }

    #[test]
    fn test_for_each_inline_is_preorder() {
        let blocks = vec![Block::Para(vec![
            Inline::Emph(vec![Inline::text("a")]),
            Inline::text("b"),
        ])];

        let mut seen = Vec::new();
        for_each_inline(&blocks, &mut |inline| {
            if let Inline::Text(s) = inline {
                seen.push(s.as_str());
            }
        });
        assert_eq!(seen, vec!["a", "b"]);
    }
}
