//! Document tree types
//!
//! The tree is a closed set of block and inline variants. Every pass over it
//! is a total function over these variants, so adding a variant is a compile
//! error everywhere it has to be handled.
//!
//! The serde form is adjacently tagged (`"t"` / `"c"`), the same shape Pandoc
//! uses for its JSON AST.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier, classes and key/value attributes attached to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attr {
    /// Element identifier (empty when absent)
    pub id: String,

    /// Class names, in source order
    pub classes: Vec<String>,

    /// Key/value attributes, in source order
    pub attributes: Vec<(String, String)>,
}

impl Attr {
    /// Attribute set carrying a single class
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Self::default()
        }
    }

    /// True when the node carries no id, classes or attributes
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.classes.is_empty() && self.attributes.is_empty()
    }

    /// Check whether `class` is present
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Append `class` unless already present
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }
}

/// Inline content of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Inline {
    /// Raw text payload
    Text(String),

    /// Inter-word space
    Space,

    /// Soft line break (renders as a blank)
    SoftBreak,

    /// Hard line break
    LineBreak,

    /// Generic formatted span carrying attributes
    Span {
        attr: Attr,
        content: Vec<Inline>,
    },

    /// Emphasis
    Emph(Vec<Inline>),

    /// Strong emphasis
    Strong(Vec<Inline>),

    /// Hyperlink
    Link {
        attr: Attr,
        content: Vec<Inline>,
        target: String,
        #[serde(default)]
        title: String,
    },

    /// Image with alternative text
    Image {
        attr: Attr,
        alt: Vec<Inline>,
        target: String,
        #[serde(default)]
        title: String,
    },

    /// Inline code (verbatim)
    Code { attr: Attr, text: String },

    /// Raw passthrough in a given output format (verbatim)
    Raw { format: String, text: String },
}

impl Inline {
    /// Plain text node
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Link with empty attributes and title
    pub fn link(content: Vec<Inline>, target: impl Into<String>) -> Self {
        Self::Link {
            attr: Attr::default(),
            content,
            target: target.into(),
            title: String::new(),
        }
    }

    /// Span with the given attributes
    pub fn span(attr: Attr, content: Vec<Inline>) -> Self {
        Self::Span { attr, content }
    }

    /// True for [`Inline::Link`]
    pub fn is_link(&self) -> bool {
        matches!(self, Self::Link { .. })
    }

    /// Child inline sequence of a wrapper node, if any
    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Self::Span { content, .. }
            | Self::Emph(content)
            | Self::Strong(content)
            | Self::Link { content, .. } => Some(content),
            Self::Image { alt, .. } => Some(alt),
            Self::Text(_)
            | Self::Space
            | Self::SoftBreak
            | Self::LineBreak
            | Self::Code { .. }
            | Self::Raw { .. } => None,
        }
    }
}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Block {
    /// Paragraph
    Para(Vec<Inline>),

    /// Inline run without paragraph semantics (tight list items, table cells)
    Plain(Vec<Inline>),

    /// Section heading
    Header {
        level: u8,
        attr: Attr,
        content: Vec<Inline>,
    },

    /// Generic container
    Div { attr: Attr, content: Vec<Block> },

    /// Quotation
    BlockQuote(Vec<Block>),

    /// Unordered list; one block sequence per item
    BulletList(Vec<Vec<Block>>),

    /// Ordered list; one block sequence per item
    OrderedList(Vec<Vec<Block>>),

    /// Fenced or indented code (verbatim)
    CodeBlock { attr: Attr, text: String },

    /// Raw passthrough block (verbatim)
    RawBlock { format: String, text: String },

    /// Thematic break
    HorizontalRule,
}

impl Block {
    /// Container block with the given attributes
    pub fn div(attr: Attr, content: Vec<Block>) -> Self {
        Self::Div { attr, content }
    }
}

/// A whole document: metadata plus top-level blocks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Free-form string metadata (title, page path, ...)
    pub meta: BTreeMap<String, String>,

    /// Top-level blocks in reading order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Document without metadata
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            meta: BTreeMap::new(),
            blocks,
        }
    }

    /// Single-paragraph document, mostly useful in tests
    pub fn paragraph(inlines: Vec<Inline>) -> Self {
        Self::new(vec![Block::Para(inlines)])
    }
}
