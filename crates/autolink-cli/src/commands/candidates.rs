use crate::config::CliConfig;
use anyhow::Result;
use autolink_core::{AutoLinker, AutoLinkerOptions};
use std::path::PathBuf;

use super::{page_target, read_document};

pub fn execute(config: CliConfig, input: Option<PathBuf>, page: Option<String>) -> Result<()> {
    let table = config.load_table()?;
    let linker = AutoLinker::new(table, AutoLinkerOptions::from(&config.autolink.engine))?;

    let doc = read_document(input.as_deref())?;
    let page = page_target(page, &doc);

    let candidates = linker.candidates(&doc, page.as_deref());
    for def in &candidates {
        println!("{}\t{}", def.pattern_text(), def.target());
    }
    eprintln!(
        "{} of {} definitions may link",
        candidates.len(),
        linker.table().len()
    );
    Ok(())
}
