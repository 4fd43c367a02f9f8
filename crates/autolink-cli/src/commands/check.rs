use crate::config::CliConfig;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct TableEntry<'a> {
    pattern: &'a str,
    target: &'a str,
}

pub fn execute(config: CliConfig, json: bool) -> Result<()> {
    let table = config.load_table()?;

    if json {
        let entries: Vec<TableEntry<'_>> = table
            .iter()
            .map(|def| TableEntry {
                pattern: def.pattern_text(),
                target: def.target(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for def in &table {
            println!("{}\t{}", def.pattern_text(), def.target());
        }
        eprintln!("{} definitions OK", table.len());
    }
    Ok(())
}
