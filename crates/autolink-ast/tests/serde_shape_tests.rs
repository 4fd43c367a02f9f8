//! JSON shape tests
//!
//! Documents arrive from an external parser as JSON; these pin the
//! adjacently-tagged layout the CLI reads and writes.

use autolink_ast::{Attr, Block, Document, Inline};
use serde_json::json;

#[test]
fn test_document_reads_tagged_json() {
    let value = json!({
        "meta": { "path": "/notes/gan" },
        "blocks": [
            { "t": "Para", "c": [
                { "t": "Text", "c": "see" },
                { "t": "Space" },
                { "t": "Link", "c": {
                    "attr": { "id": "", "classes": [], "attributes": [] },
                    "content": [ { "t": "Text", "c": "GAN" } ],
                    "target": "/gan"
                } }
            ] }
        ]
    });

    let doc: Document = serde_json::from_value(value).expect("valid document");
    assert_eq!(doc.meta.get("path").map(String::as_str), Some("/notes/gan"));
    assert_eq!(
        doc.blocks,
        vec![Block::Para(vec![
            Inline::text("see"),
            Inline::Space,
            Inline::link(vec![Inline::text("GAN")], "/gan"),
        ])]
    );
}

#[test]
fn test_attr_fields_default_when_missing() {
    let value = json!({ "t": "Span", "c": { "attr": { "classes": ["x"] }, "content": [] } });
    let inline: Inline = serde_json::from_value(value).expect("valid span");
    assert_eq!(inline, Inline::span(Attr::with_class("x"), vec![]));
}

#[test]
fn test_unit_variant_serializes_without_content() {
    let value = serde_json::to_value(Inline::Space).expect("serializable");
    assert_eq!(value, json!({ "t": "Space" }));
}
