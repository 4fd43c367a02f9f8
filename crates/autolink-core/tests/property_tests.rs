//! Property-based tests for the pipeline invariants
//!
//! Documents are generated from a small vocabulary that overlaps the
//! definition patterns, with nested styling, manual links, code and
//! attribute-less wrappers.

use autolink_ast::{
    extract_existing_targets, for_each_inline, inline_plain_text, map_inline_sequences,
    render_plain_text, Attr, Block, Document, Inline,
};
use autolink_core::cleanup::contains_link;
use autolink_core::{
    AutoLinker, AutoLinkerOptions, CandidateFilter, Definition, DefinitionTable,
    EmptyWrapperFlattening, FilterOptions, RedundancyReducer, SkippedSpanFlattening,
    TreeRewriter, TreeTransform, LINK_AUTO_CLASS,
};
use proptest::prelude::*;
use std::collections::HashSet;

const PAIRS: &[(&str, &str)] = &[
    ("GAN", "/gan"),
    ("BigGAN", "/biggan"),
    ("Big GAN", "/big-gan"),
    ("VAE", "/vae"),
    ("Transformer", "/transformer"),
    ("model", "/model"),
    ("diffusion model", "/diffusion"),
];

fn table() -> DefinitionTable {
    DefinitionTable::build(PAIRS.iter().copied()).unwrap()
}

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "GAN", "BigGAN", "Big", "VAE", "model", "diffusion", "(GAN)", "GAN,", "“VAE”", "GANs",
        "the", "a", "", " ",
    ])
    .prop_map(str::to_string)
}

fn leaf() -> impl Strategy<Value = Inline> + Clone {
    prop_oneof![
        4 => word().prop_map(Inline::Text),
        2 => Just(Inline::Space),
        1 => Just(Inline::SoftBreak),
        1 => word().prop_map(|text| Inline::Code { attr: Attr::default(), text }),
    ]
}

fn inline() -> impl Strategy<Value = Inline> + Clone {
    leaf().prop_recursive(3, 32, 4, |inner| {
        let content = prop::collection::vec(inner, 0..4);
        // Manual links hold only flat text, as a parsed document would
        let link_content = prop::collection::vec(leaf(), 0..4);
        prop_oneof![
            content.clone().prop_map(Inline::Emph),
            content.clone().prop_map(Inline::Strong),
            content.prop_map(|c| Inline::span(Attr::default(), c)),
            link_content.prop_map(|c| Inline::link(c, "/manual")),
        ]
    })
}

fn block() -> impl Strategy<Value = Block> {
    let inlines = prop::collection::vec(inline(), 0..8);
    prop_oneof![
        3 => inlines.clone().prop_map(Block::Para),
        1 => inlines.clone().prop_map(|c| Block::div(Attr::default(), vec![Block::Para(c)])),
        1 => inlines.prop_map(|c| Block::BlockQuote(vec![Block::Plain(c)])),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(block(), 1..5).prop_map(Document::new)
}

fn linker(parallelism: usize) -> AutoLinker {
    AutoLinker::new(
        table(),
        AutoLinkerOptions {
            filter: FilterOptions {
                parallelism,
                ..FilterOptions::single_threaded()
            },
            ..AutoLinkerOptions::default()
        },
    )
    .unwrap()
}

/// Text of every inline sequence, in reading order
fn prose(doc: &Document) -> Vec<String> {
    let mut runs = Vec::new();
    map_inline_sequences(doc.blocks.clone(), &mut |inlines, _| {
        runs.push(inline_plain_text(&inlines));
        inlines
    });
    runs.retain(|run| !run.is_empty());
    runs
}

fn auto_link_targets(doc: &Document) -> Vec<String> {
    let mut targets = Vec::new();
    for_each_inline(&doc.blocks, &mut |inline| {
        if let Inline::Link { attr, target, .. } = inline {
            if attr.has_class(LINK_AUTO_CLASS) {
                targets.push(target.clone());
            }
        }
    });
    targets
}

proptest! {
    /// Property: no link in the output transitively contains another link
    #[test]
    fn output_has_no_nested_links(doc in document()) {
        let (out, _) = linker(1).link(doc);

        for_each_inline(&out.blocks, &mut |inline| {
            if let Inline::Link { content, .. } = inline {
                assert!(!content.iter().any(contains_link), "nested link in {inline:?}");
            }
        });
    }

    /// Property: linking never changes the prose, only wraps it
    #[test]
    fn prose_is_preserved(doc in document()) {
        let before = prose(&doc);
        let (out, _) = linker(1).link(doc);
        prop_assert_eq!(prose(&out), before);
    }

    /// Property: each target gets at most one auto-generated link
    #[test]
    fn at_most_one_link_per_target(doc in document()) {
        let (out, report) = linker(1).link(doc);
        let targets = auto_link_targets(&out);
        let distinct: HashSet<&String> = targets.iter().collect();

        prop_assert_eq!(distinct.len(), targets.len());
        prop_assert_eq!(targets.len(), report.links_created);
        prop_assert!(!targets.iter().any(|t| t == "/manual"));
    }

    /// Property: retained definitions match the plain text, discarded ones do not
    #[test]
    fn filter_keeps_exactly_the_matching_definitions(doc in document(), parallelism in 1usize..6) {
        let table = table();
        let filter = CandidateFilter::new(FilterOptions {
            parallelism,
            ..FilterOptions::single_threaded()
        })
        .unwrap();
        let plain = render_plain_text(&doc);
        let padded = format!(" {plain} ");

        let kept: Vec<&str> = filter
            .prune(&table, &[], &plain, None)
            .into_iter()
            .map(Definition::pattern_text)
            .collect();
        let expected: Vec<&str> = table
            .iter()
            .filter(|def| def.is_match_padded(&padded))
            .map(Definition::pattern_text)
            .collect();

        prop_assert_eq!(kept, expected);
    }

    /// Property: pruning never loses a rewrite the full table would make
    #[test]
    fn filtered_rewrite_equals_unfiltered_rewrite(doc in document()) {
        let table = table();
        let filter = CandidateFilter::new(FilterOptions::single_threaded()).unwrap();
        let existing = extract_existing_targets(&doc);
        let candidates = filter.prune(&table, &existing, &render_plain_text(&doc), None);
        let unsuppressed: Vec<&Definition> = table
            .iter()
            .filter(|def| !existing.iter().any(|t| t == def.target()))
            .collect();

        let rewriter = TreeRewriter::default();
        prop_assert_eq!(
            rewriter.rewrite(doc.clone(), &candidates),
            rewriter.rewrite(doc, &unsuppressed)
        );
    }

    /// Property: parallel and single-threaded runs agree
    #[test]
    fn parallelism_does_not_change_output(doc in document()) {
        prop_assert_eq!(linker(1).link(doc.clone()), linker(4).link(doc));
    }

    /// Property: the flattening passes are idempotent
    #[test]
    fn cleanup_is_idempotent(doc in document()) {
        let table = table();
        let defs: Vec<&Definition> = table.iter().collect();
        let reduced = RedundancyReducer.transform(TreeRewriter::default().rewrite(doc, &defs));

        let passes: [&dyn TreeTransform; 2] = [&SkippedSpanFlattening, &EmptyWrapperFlattening];
        let once = passes.iter().fold(reduced, |doc, pass| pass.transform(doc));
        let twice = passes.iter().fold(once.clone(), |doc, pass| pass.transform(doc));
        prop_assert_eq!(once, twice);
    }
}
