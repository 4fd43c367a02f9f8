//! Plain-text rendering and link extraction

use crate::types::{Block, Document, Inline};
use crate::walk::for_each_inline;

/// Render the whole document as one flattened plain-text string.
///
/// Blocks are separated by newlines and spaces render as blanks. Every
/// wrapper or opaque inline is additionally set off by a blank on each side,
/// so any run of adjacent text/space nodes appears in the output bounded by
/// whitespace (or the string edge). A boundary-guarded pattern that matches
/// inside such a run therefore also matches somewhere in this string.
pub fn render_plain_text(doc: &Document) -> String {
    let mut out = String::new();
    render_blocks(&doc.blocks, &mut out);
    out
}

fn render_blocks(blocks: &[Block], out: &mut String) {
    for block in blocks {
        match block {
            Block::Para(content) | Block::Plain(content) | Block::Header { content, .. } => {
                render_inlines(content, out, true);
            }
            Block::Div { content, .. } | Block::BlockQuote(content) => {
                render_blocks(content, out);
            }
            Block::BulletList(items) | Block::OrderedList(items) => {
                for item in items {
                    render_blocks(item, out);
                }
            }
            Block::CodeBlock { text, .. } | Block::RawBlock { text, .. } => out.push_str(text),
            Block::HorizontalRule => {}
        }
        out.push('\n');
    }
}

fn render_inlines(inlines: &[Inline], out: &mut String, padded: bool) {
    for inline in inlines {
        match inline {
            Inline::Text(s) => out.push_str(s),
            Inline::Space | Inline::SoftBreak => out.push(' '),
            Inline::LineBreak => out.push('\n'),
            Inline::Code { text, .. } | Inline::Raw { text, .. } => {
                pad(out, padded);
                out.push_str(text);
                pad(out, padded);
            }
            Inline::Span { content, .. }
            | Inline::Emph(content)
            | Inline::Strong(content)
            | Inline::Link { content, .. } => {
                pad(out, padded);
                render_inlines(content, out, padded);
                pad(out, padded);
            }
            Inline::Image { alt, .. } => {
                pad(out, padded);
                render_inlines(alt, out, padded);
                pad(out, padded);
            }
        }
    }
}

fn pad(out: &mut String, padded: bool) {
    if padded {
        out.push(' ');
    }
}

/// Concatenated text content of an inline sequence, without any padding
pub fn inline_plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    render_inlines(inlines, &mut out, false);
    out
}

/// Targets of every link in the document, in document order.
///
/// Image sources are not links and are not included.
pub fn extract_existing_targets(doc: &Document) -> Vec<String> {
    collect_links(doc)
        .into_iter()
        .map(|(target, _)| target.to_string())
        .collect()
}

/// Every link in document order as `(target, visible text)`
pub fn collect_links(doc: &Document) -> Vec<(&str, String)> {
    let mut links = Vec::new();
    for_each_inline(&doc.blocks, &mut |inline| {
        if let Inline::Link {
            target, content, ..
        } = inline
        {
            links.push((target.as_str(), inline_plain_text(content)));
        }
    });
    links
}
