//! List command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use sm_core::{Catalog, Category};

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::load_pipeline;

/// Execute the ls command
pub fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let pipeline = load_pipeline(global)?;
    let catalogs = pipeline.plan().context("Failed to build migration catalog")?;
    let entries = entry_infos(&catalogs);

    match args.output {
        LsOutput::Table => print_table(&entries),
        LsOutput::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }

    Ok(())
}

/// Catalog entry information for display
#[derive(Debug, Serialize)]
struct EntryInfo {
    category: Category,
    index: usize,
    source_index: u64,
    name: String,
    source: String,
    destination: String,
}

fn entry_infos(catalogs: &[Catalog]) -> Vec<EntryInfo> {
    catalogs
        .iter()
        .flat_map(|catalog| catalog.entries())
        .map(|entry| EntryInfo {
            category: entry.category(),
            index: entry.destination_index,
            source_index: entry.source.original_index,
            name: entry.file_name(),
            source: entry.source.original_path.display().to_string(),
            destination: entry.destination_path.display().to_string(),
        })
        .collect()
}

/// Print entries in table format
fn print_table(entries: &[EntryInfo]) {
    let name_width = entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let category_width = 10;

    println!(
        "{:<category_width$}  {:<name_width$}  SOURCE",
        "CATEGORY", "NAME"
    );
    println!(
        "{:-<category_width$}  {:-<name_width$}  {}",
        "",
        "",
        "-".repeat(40)
    );

    for entry in entries {
        println!(
            "{:<category_width$}  {:<name_width$}  {}",
            entry.category,
            entry.name,
            entry.source
        );
    }

    println!();
    println!("{} file(s)", entries.len());
}

#[cfg(test)]
#[path = "ls_test.rs"]
mod tests;
