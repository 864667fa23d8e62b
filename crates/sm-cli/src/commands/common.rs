//! Shared helpers for commands

use anyhow::{Context, Result};
use sm_core::{Config, Pipeline};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Load the configuration and build the pipeline for this invocation.
///
/// Relative paths in the config resolve against the directory holding the
/// config file: `--config`'s parent when given, otherwise `--project-dir`.
pub(crate) fn load_pipeline(global: &GlobalArgs) -> Result<Pipeline> {
    let (config, root) = load_config(global)?;
    Pipeline::new(&config, &root).context("Invalid sqlmove configuration")
}

fn load_config(global: &GlobalArgs) -> Result<(Config, PathBuf)> {
    match &global.config {
        Some(path) => {
            let config = Config::load(path).context("Failed to load config")?;
            let dir = path.parent().unwrap_or(Path::new("."));
            Ok((config, resolve_root(dir)?))
        }
        None => {
            let root = resolve_root(&global.project_dir)?;
            let config = Config::load_from_dir(&root).context("Failed to load config")?;
            Ok((config, root))
        }
    }
}

fn resolve_root(dir: &Path) -> Result<PathBuf> {
    // `Path::parent` of a bare file name is ""
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    std::fs::canonicalize(dir)
        .with_context(|| format!("Project directory not found: {}", dir.display()))
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
