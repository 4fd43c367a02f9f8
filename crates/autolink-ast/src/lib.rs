//! # Autolink AST
//!
//! Document tree consumed and produced by the autolink engine.
//!
//! This crate provides:
//! - **types**: closed `Block` / `Inline` variants with Pandoc-shaped serde
//! - **walk**: sequence rewrites with splice semantics and read-only visitors
//! - **text**: plain-text rendering and existing-link extraction
//!
//! Parsing markup into this tree and serializing it back out are left to
//! the caller; the engine only needs the tree itself.

pub mod text;
pub mod types;
pub mod walk;

pub use text::{collect_links, extract_existing_targets, inline_plain_text, render_plain_text};
pub use types::{Attr, Block, Document, Inline};
pub use walk::{
    for_each_inline, map_inline_sequences, rewrite_all_inlines, rewrite_blocks_deep,
    rewrite_inlines_deep, rewrite_seq, InlineHost, Rewrite,
};
