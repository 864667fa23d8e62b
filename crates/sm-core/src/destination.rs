//! Destination tree reset and file materialization

use crate::catalog::{CatalogEntry, Category};
use crate::error::{CoreError, CoreResult};
use std::io::ErrorKind;
use std::path::Path;

/// Reset the destination root to an empty tree with one subdirectory per
/// category.
///
/// Any existing content under `root` is removed. A missing root is not an
/// error. There is no staging directory: if a later step fails the
/// destination is left reset but incomplete.
pub fn prepare_destination(root: &Path) -> CoreResult<()> {
    match std::fs::remove_dir_all(root) {
        Ok(()) => log::debug!("Removed existing destination {}", root.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(CoreError::destination_write(root, e)),
    }

    std::fs::create_dir_all(root).map_err(|e| CoreError::destination_write(root, e))?;
    for category in Category::ALL {
        let dir = root.join(category.subdir());
        std::fs::create_dir(&dir).map_err(|e| CoreError::destination_write(&dir, e))?;
    }
    Ok(())
}

/// Copy the bytes of an entry's source file to its destination path.
///
/// Returns the number of bytes written.
pub fn materialize(entry: &CatalogEntry) -> CoreResult<u64> {
    let source = &entry.source.original_path;
    let bytes = std::fs::read(source).map_err(|e| CoreError::source_unreadable(source, e))?;

    let destination = &entry.destination_path;
    std::fs::write(destination, &bytes)
        .map_err(|e| CoreError::destination_write(destination, e))?;

    log::debug!("Copied {} -> {}", source.display(), destination.display());
    Ok(bytes.len() as u64)
}

#[cfg(test)]
#[path = "destination_test.rs"]
mod tests;
