//! Catalog collectors: produce the source descriptors of one category
//!
//! Two strategies exist. [`ScanNumbered`] walks a directory tree for files
//! named `<digits>-<rest>`, and [`FixedList`] enumerates a caller-supplied
//! ordered list of file names. Both feed the same sequencer.

use crate::catalog::{Category, SourceDescriptor};
use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Produces the unsequenced descriptors of one category.
///
/// Implementations never touch the destination and never write to the
/// filesystem.
pub trait Collector: std::fmt::Debug {
    /// Category every produced descriptor belongs to
    fn category(&self) -> Category;

    /// Collect descriptors. Fails only when the source root is inaccessible.
    fn collect(&self) -> CoreResult<Vec<SourceDescriptor>>;
}

/// Recursive scan for numerically prefixed files
#[derive(Debug, Clone)]
pub struct ScanNumbered {
    category: Category,
    root: PathBuf,
    extension: Option<String>,
}

impl ScanNumbered {
    /// Scan `root` for files of `category`
    pub fn new(category: Category, root: impl Into<PathBuf>) -> Self {
        Self {
            category,
            root: root.into(),
            extension: None,
        }
    }

    /// Only collect files with this extension (without the leading dot)
    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    fn scan_dir(&self, dir: &Path, out: &mut Vec<SourceDescriptor>) -> CoreResult<()> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| CoreError::source_unreadable(dir, e))? {
            let entry = entry.map_err(|e| CoreError::source_unreadable(dir, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| CoreError::source_unreadable(&entry.path(), e))?;
            entries.push((entry.path(), file_type));
        }
        // read_dir order is platform dependent
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (path, file_type) in entries {
            // Symlinked directories are not followed; they may loop back.
            if file_type.is_dir() {
                self.scan_dir(&path, out)?;
                continue;
            }
            if file_type.is_symlink() && path.is_dir() {
                log::debug!("Skipping symlinked directory {}", path.display());
                continue;
            }
            if !path.is_file() {
                continue;
            }
            if let Some(ext) = &self.extension {
                if path.extension().and_then(|e| e.to_str()) != Some(ext.as_str()) {
                    continue;
                }
            }
            let parsed = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(parse_numbered_name);
            match parsed {
                Some((index, name)) => out.push(SourceDescriptor {
                    original_index: index,
                    original_name: name.to_string(),
                    original_path: path.clone(),
                    category: self.category,
                }),
                None => log::debug!("Skipping unnumbered file {}", path.display()),
            }
        }
        Ok(())
    }
}

impl Collector for ScanNumbered {
    fn category(&self) -> Category {
        self.category
    }

    fn collect(&self) -> CoreResult<Vec<SourceDescriptor>> {
        let mut descriptors = Vec::new();
        self.scan_dir(&self.root, &mut descriptors)?;
        log::debug!(
            "Collected {} {} file(s) from {}",
            descriptors.len(),
            self.category,
            self.root.display()
        );
        Ok(descriptors)
    }
}

/// Fixed, ordered list of file names under one directory
#[derive(Debug, Clone)]
pub struct FixedList {
    category: Category,
    root: PathBuf,
    names: Vec<String>,
}

impl FixedList {
    /// List `names` in order, resolved against `root`
    pub fn new(category: Category, root: impl Into<PathBuf>, names: Vec<String>) -> Self {
        Self {
            category,
            root: root.into(),
            names,
        }
    }
}

impl Collector for FixedList {
    fn category(&self) -> Category {
        self.category
    }

    fn collect(&self) -> CoreResult<Vec<SourceDescriptor>> {
        // Listed files are not checked here; a missing one fails at copy time.
        std::fs::metadata(&self.root).map_err(|e| CoreError::source_unreadable(&self.root, e))?;

        Ok(self
            .names
            .iter()
            .zip(1u64..)
            .map(|(name, index)| SourceDescriptor {
                original_index: index,
                original_name: name.clone(),
                original_path: self.root.join(name),
                category: self.category,
            })
            .collect())
    }
}

/// Split a `<digits>-<rest>` file name into its numeric prefix and remainder.
///
/// Returns `None` when there is no `-`, the prefix is empty or not all ASCII
/// digits, the prefix overflows `u64`, or the remainder is empty.
///
/// # Examples
/// ```
/// use sm_core::collector::parse_numbered_name;
/// assert_eq!(parse_numbered_name("007-foo_bar.sql"), Some((7, "foo_bar.sql")));
/// assert_eq!(parse_numbered_name("readme.txt"), None);
/// ```
pub fn parse_numbered_name(file_name: &str) -> Option<(u64, &str)> {
    let (prefix, rest) = file_name.split_once('-')?;
    if prefix.is_empty() || rest.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = prefix.parse().ok()?;
    Some((index, rest))
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
