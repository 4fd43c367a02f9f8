pub mod candidates;
pub mod check;
pub mod link;

use anyhow::{Context, Result};
use autolink_ast::Document;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Metadata key consulted for the page target when `--page` is not given
pub const PAGE_META_KEY: &str = "page";

/// Read a JSON document from a file, or stdin for `None` / `-`
pub fn read_document(input: Option<&Path>) -> Result<Document> {
    let content = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read document from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Input is not a valid document tree")
}

/// Write a JSON document to a file, or stdout for `None`
pub fn write_document(doc: &Document, output: Option<&PathBuf>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    };
    match output {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}").context("Failed to write to stdout")
        }
    }
}

/// `--page`, else the document's own `page` metadata entry
pub fn page_target(explicit: Option<String>, doc: &Document) -> Option<String> {
    explicit.or_else(|| doc.meta.get(PAGE_META_KEY).cloned())
}
