use crate::config::CliConfig;
use anyhow::Result;
use autolink_core::{AutoLinker, AutoLinkerOptions};
use std::path::PathBuf;
use tracing::info;

use super::{page_target, read_document, write_document};

pub struct LinkArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub page: Option<String>,
    pub pretty: bool,
    pub report: bool,
}

pub fn execute(config: CliConfig, args: LinkArgs) -> Result<()> {
    let table = config.load_table()?;
    let linker = AutoLinker::new(table, AutoLinkerOptions::from(&config.autolink.engine))?;

    let doc = read_document(args.input.as_deref())?;
    let page = page_target(args.page, &doc);

    let (doc, report) = match page.as_deref() {
        Some(page) => {
            info!(page, "linking page");
            linker.link_page(doc, page)
        }
        None => linker.link(doc),
    };

    write_document(&doc, args.output.as_ref(), args.pretty)?;
    if args.report {
        eprintln!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}
