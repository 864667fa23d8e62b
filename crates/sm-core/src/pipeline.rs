//! End-to-end regeneration of the destination migration tree
//!
//! A run collects and sequences every category first, so a missing source
//! root aborts before the destination is touched. The destination is then
//! reset once and each entry is copied and rewritten in catalog order. Any
//! failure aborts the run and leaves the destination reset but incomplete.

use crate::catalog::{Catalog, Category};
use crate::collector::{Collector, FixedList, ScanNumbered};
use crate::config::Config;
use crate::destination::{materialize, prepare_destination};
use crate::error::CoreResult;
use crate::rewriter::Rewriter;
use crate::sequencer::sequence_category;
use std::path::{Path, PathBuf};

/// Configured migration relocation run
#[derive(Debug)]
pub struct Pipeline {
    collectors: Vec<Box<dyn Collector>>,
    destination_root: PathBuf,
    rewriter: Rewriter,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Destination root that was regenerated
    pub destination_root: PathBuf,
    /// Number of files written, per category in pipeline order
    pub files: Vec<(Category, usize)>,
    /// Total bytes copied
    pub bytes: u64,
    /// Number of files changed by substitutions
    pub rewritten: usize,
}

impl RunSummary {
    /// Total number of files written
    pub fn total_files(&self) -> usize {
        self.files.iter().map(|(_, n)| n).sum()
    }
}

impl Pipeline {
    /// Build the pipeline for `config`, resolving relative paths against `root`
    pub fn new(config: &Config, root: &Path) -> CoreResult<Self> {
        config.validate()?;
        config.check_disjoint_roots(root)?;

        let scan = ScanNumbered::new(Category::Migration, config.preinstall_path(root))
            .with_extension(config.scan_extension.clone());
        let fixed = FixedList::new(
            Category::Idempotent,
            config.idempotent_path(root),
            config.idempotent_files.clone(),
        );

        let collectors: Vec<Box<dyn Collector>> = vec![Box::new(scan), Box::new(fixed)];
        Ok(Self::from_parts(
            collectors,
            config.destination_root_absolute(root),
            Rewriter::new(config.substitutions.clone()),
        ))
    }

    /// Assemble a pipeline from explicit collectors.
    ///
    /// Each collector must produce a different category, otherwise their
    /// destination paths collide.
    pub fn from_parts(
        collectors: Vec<Box<dyn Collector>>,
        destination_root: PathBuf,
        rewriter: Rewriter,
    ) -> Self {
        Self {
            collectors,
            destination_root,
            rewriter,
        }
    }

    /// Destination root this pipeline regenerates
    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Collect and sequence every category without writing anything
    pub fn plan(&self) -> CoreResult<Vec<Catalog>> {
        self.collectors
            .iter()
            .map(|collector| {
                let descriptors = collector.collect()?;
                sequence_category(&self.destination_root, collector.category(), descriptors)
            })
            .collect()
    }

    /// Regenerate the destination tree
    pub fn run(&self) -> CoreResult<RunSummary> {
        let catalogs = self.plan()?;

        log::info!("Resetting {}", self.destination_root.display());
        prepare_destination(&self.destination_root)?;

        let mut summary = RunSummary {
            destination_root: self.destination_root.clone(),
            files: Vec::with_capacity(catalogs.len()),
            bytes: 0,
            rewritten: 0,
        };

        for catalog in &catalogs {
            for entry in catalog.entries() {
                summary.bytes += materialize(entry)?;
                if self.rewriter.rewrite_file(&entry.destination_path)? {
                    summary.rewritten += 1;
                }
            }
            log::info!("Wrote {} {} file(s)", catalog.len(), catalog.category());
            summary.files.push((catalog.category(), catalog.len()));
        }

        Ok(summary)
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
