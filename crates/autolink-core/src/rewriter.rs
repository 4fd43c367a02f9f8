//! Tree rewriter
//!
//! Walks every inline sequence, merges adjacent text/space fragments into
//! single text runs, and replaces the first matching substring of each run
//! with an auto-generated link. The text on either side of a match is
//! processed again, so one run can yield several links.

use crate::definition::{is_delimiter, pad, Definition};
use autolink_ast::{map_inline_sequences, Attr, Document, Inline, InlineHost};
use regex::Match;
use tracing::trace;

/// Class carried by every link this engine creates
pub const LINK_AUTO_CLASS: &str = "link-auto";

/// Result of matching one text run against the definition list.
///
/// `leading + core + trailing` is the matched substring; the delimiters are
/// empty when the match touched the start or end of the run.
#[derive(Debug, Clone)]
pub struct MatchResult<'d> {
    /// Text before the match
    pub before: String,
    /// Delimiter consumed in front of the pattern
    pub leading: String,
    /// The pattern's own text, which becomes the link text
    pub core: String,
    /// Delimiter consumed after the pattern
    pub trailing: String,
    /// Text after the match
    pub after: String,
    /// Definition that matched
    pub definition: &'d Definition,
}

impl MatchResult<'_> {
    /// Full matched substring, delimiters included
    pub fn matched(&self) -> String {
        format!("{}{}{}", self.leading, self.core, self.trailing)
    }

    /// Target of the matching definition
    pub fn target(&self) -> &str {
        self.definition.target()
    }
}

/// Find the first definition, in priority order, that matches anywhere in
/// `text`, and split `text` around that match.
pub fn match_text<'d>(text: &str, definitions: &[&'d Definition]) -> Option<MatchResult<'d>> {
    if text.is_empty() {
        return None;
    }
    let padded = pad(text);

    definitions.iter().find_map(|definition| {
        let found = definition.regex().find(&padded)?;
        Some(split_match(text, &padded, found.start(), found.end(), definition))
    })
}

/// Byte offsets of one match in the unpadded text: match start, core
/// start, core end, match end. `padded_core_end` is where the trailing
/// delimiter starts in `padded`.
#[derive(Debug, Clone, Copy)]
struct MatchSpan {
    start: usize,
    core_start: usize,
    core_end: usize,
    end: usize,
    padded_core_end: usize,
}

/// Map a match in `padded` back onto the original text.
///
/// Offsets into `padded` are clamped to the original text's span before the
/// one-byte sentinel shift, so a sentinel consumed as a delimiter vanishes.
fn locate(padded: &str, start: usize, end: usize) -> MatchSpan {
    let matched = &padded[start..end];

    let core_start = match matched.chars().next() {
        Some(c) if is_delimiter(c) => start + c.len_utf8(),
        _ => start,
    };
    let core_end = match matched.chars().next_back() {
        Some(c) if is_delimiter(c) && end - c.len_utf8() >= core_start => end - c.len_utf8(),
        _ => end,
    };

    let orig = |offset: usize| offset.clamp(1, padded.len() - 1) - 1;
    MatchSpan {
        start: orig(start),
        core_start: orig(core_start),
        core_end: orig(core_end),
        end: orig(end),
        padded_core_end: core_end,
    }
}

fn split_match<'d>(
    text: &str,
    padded: &str,
    start: usize,
    end: usize,
    definition: &'d Definition,
) -> MatchResult<'d> {
    let span = locate(padded, start, end);
    MatchResult {
        before: text[..span.start].to_string(),
        leading: text[span.start..span.core_start].to_string(),
        core: text[span.core_start..span.core_end].to_string(),
        trailing: text[span.core_end..span.end].to_string(),
        after: text[span.end..].to_string(),
        definition,
    }
}

/// Rewriter settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriterOptions {
    /// Leave header text untouched
    pub skip_headers: bool,
}

/// Inserts auto-generated links into a document
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRewriter {
    options: RewriterOptions,
}

impl TreeRewriter {
    /// Rewriter with the given options
    pub fn new(options: RewriterOptions) -> Self {
        Self { options }
    }

    /// Rewrite every eligible text run in `doc` using `definitions`, which
    /// must be in priority order. Text runs are merged even when
    /// `definitions` is empty.
    pub fn rewrite(&self, doc: Document, definitions: &[&Definition]) -> Document {
        let Document { meta, blocks } = doc;
        let blocks = map_inline_sequences(blocks, &mut |inlines, host| {
            if host == InlineHost::Header && self.options.skip_headers {
                inlines
            } else {
                rewrite_inlines(inlines, definitions)
            }
        });
        Document { meta, blocks }
    }
}

/// Rewrite one inline sequence (and the payloads of styled wrappers in it)
pub fn rewrite_inlines(inlines: Vec<Inline>, definitions: &[&Definition]) -> Vec<Inline> {
    let mut out = Vec::with_capacity(inlines.len());
    for inline in merge_text_runs(inlines) {
        match inline {
            Inline::Text(text) => link_text(text, definitions, &mut out),
            Inline::Span { attr, content } => out.push(Inline::Span {
                attr,
                content: rewrite_inlines(content, definitions),
            }),
            Inline::Emph(content) => out.push(Inline::Emph(rewrite_inlines(content, definitions))),
            Inline::Strong(content) => {
                out.push(Inline::Strong(rewrite_inlines(content, definitions)));
            }
            // Existing links and verbatim content are never rewritten
            opaque @ (Inline::Link { .. }
            | Inline::Image { .. }
            | Inline::Code { .. }
            | Inline::Raw { .. }
            | Inline::Space
            | Inline::SoftBreak
            | Inline::LineBreak) => out.push(opaque),
        }
    }
    out
}

/// Merge each maximal run of adjacent `Text`/`Space` nodes into one `Text`,
/// with a blank for every space.
pub fn merge_text_runs(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        let piece = match inline {
            Inline::Text(text) => text,
            Inline::Space => " ".to_string(),
            other => {
                out.push(other);
                continue;
            }
        };
        push_text(&mut out, &piece);
    }
    out
}

/// Append text, extending a trailing `Text` node instead of starting a new one
fn push_text(out: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(Inline::Text(text.to_string()));
    }
}

/// Link every match in `text`.
///
/// Walks the run left to right: at each step the first definition, in
/// priority order, with a match in the rest of the run wins. Text skipped
/// over before that match is linked recursively, since a lower-priority
/// definition may still match there. A match's trailing delimiter can
/// serve as the next match's leading one.
fn link_text(text: String, definitions: &[&Definition], out: &mut Vec<Inline>) {
    let padded = pad(&text);
    // Next match per definition; a match starting before `from` is stale
    let mut next: Vec<Option<Match<'_>>> = definitions
        .iter()
        .map(|definition| definition.regex().find(&padded))
        .collect();
    // Text before `done` has been emitted; searches resume at `from` in `padded`
    let mut done = 0;
    let mut from = 0;

    loop {
        let mut hit = None;
        for (slot, definition) in next.iter_mut().zip(definitions) {
            if matches!(slot, Some(found) if found.start() < from) {
                *slot = definition.regex().find_at(&padded, from);
            }
            if let Some(found) = slot {
                hit = Some((*found, *definition));
                break;
            }
        }
        let Some((found, definition)) = hit else {
            break;
        };

        let span = locate(&padded, found.start(), found.end());
        let start = span.start.max(done);
        if start > done {
            link_text(text[done..start].to_string(), definitions, out);
        }

        push_text(out, &text[start..span.core_start]);
        if span.core_start == span.core_end {
            // The guard matched two delimiters around an empty pattern match.
            // Nothing to link; keep the text and carry on.
            trace!(pattern = definition.pattern_text(), "empty match ignored");
        } else {
            out.push(auto_link(
                &text[span.core_start..span.core_end],
                definition.target(),
            ));
        }
        push_text(out, &text[span.core_end..span.end]);

        done = span.end;
        from = span.padded_core_end;
    }

    push_text(out, &text[done..]);
}

fn auto_link(text: &str, target: &str) -> Inline {
    Inline::Link {
        attr: Attr::with_class(LINK_AUTO_CLASS),
        content: vec![Inline::Text(text.to_string())],
        target: target.to_string(),
        title: String::new(),
    }
}
