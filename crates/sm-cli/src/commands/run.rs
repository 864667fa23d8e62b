//! Run command implementation

use anyhow::{Context, Result};
use sm_core::RunSummary;

use crate::cli::GlobalArgs;
use crate::commands::common::load_pipeline;

/// Execute the run command
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let pipeline = load_pipeline(global)?;

    let summary = pipeline.run().with_context(|| {
        format!(
            "Failed to regenerate {}",
            pipeline.destination_root().display()
        )
    })?;

    for line in summary_lines(&summary) {
        println!("{line}");
    }

    Ok(())
}

/// Human-readable report of a completed run
fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![format!("Regenerated {}", summary.destination_root.display())];
    for (category, count) in &summary.files {
        lines.push(format!("  {:<12} {} file{}", category, count, plural(*count)));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} file{} written ({} bytes), {} rewritten",
        summary.total_files(),
        plural(summary.total_files()),
        summary.bytes,
        summary.rewritten
    ));
    lines
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
