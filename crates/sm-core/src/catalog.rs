//! Catalog model: source descriptors and the sequenced entries derived from them

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Independent numbering domain for migration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Numbered preinstall files, discovered by scanning
    Migration,
    /// Files re-applied on every upgrade, taken from a fixed list
    Idempotent,
}

impl Category {
    /// All categories in the order the pipeline processes them
    pub const ALL: [Category; 2] = [Category::Migration, Category::Idempotent];

    /// Subdirectory of the destination root holding this category's files
    pub fn subdir(self) -> &'static str {
        match self {
            Category::Migration => "migration",
            Category::Idempotent => "idempotent",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.subdir())
    }
}

/// One input file as produced by a collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Ordering key within the category. Never used for output naming.
    pub original_index: u64,
    /// Base name of the file at the source, without any numeric prefix
    pub original_name: String,
    /// Path of the readable source file
    pub original_path: PathBuf,
    /// Numbering domain the file belongs to
    pub category: Category,
}

/// A source descriptor with its computed destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The descriptor this entry was sequenced from
    pub source: SourceDescriptor,
    /// Dense 1-based position within the category
    pub destination_index: usize,
    /// Normalized file name, without the index prefix
    pub destination_name: String,
    /// Full path the file is materialized at
    pub destination_path: PathBuf,
}

impl CatalogEntry {
    /// Category of the underlying source file
    pub fn category(&self) -> Category {
        self.source.category
    }

    /// File name of the destination, including the index prefix
    pub fn file_name(&self) -> String {
        destination_file_name(self.destination_index, &self.destination_name)
    }
}

/// Sequenced entries of a single category, in destination order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    category: Category,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub(crate) fn new(category: Category, entries: Vec<CatalogEntry>) -> Self {
        Self { category, entries }
    }

    /// Category every entry belongs to
    pub fn category(&self) -> Category {
        self.category
    }

    /// Entries ordered by destination index
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the category collected no files
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a source file name for the destination tree.
///
/// Lower-cases the name and replaces every `_` with `-`. Applying it to an
/// already normalized name returns the name unchanged.
///
/// # Examples
/// ```
/// use sm_core::catalog::normalize_name;
/// assert_eq!(normalize_name("Tag_Operators.sql"), "tag-operators.sql");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('_', "-")
}

/// Build `<index>-<name>` with the index zero-padded to three digits.
///
/// Indices above 999 simply widen the prefix.
pub fn destination_file_name(index: usize, name: &str) -> String {
    format!("{:03}-{}", index, name)
}

/// Compute the destination path of a file within a category subtree
pub fn destination_path(root: &Path, category: Category, index: usize, name: &str) -> PathBuf {
    root.join(category.subdir()).join(destination_file_name(index, name))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
