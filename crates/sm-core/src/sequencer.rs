//! Dense renumbering of collected descriptors

use crate::catalog::{
    destination_path, normalize_name, Catalog, CatalogEntry, Category, SourceDescriptor,
};
use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// Sequence the descriptors of a single category.
///
/// Descriptors are stably sorted by `original_index` and numbered `1..=N`,
/// regardless of gaps in the source numbering. Every descriptor must belong
/// to `category`; each category is numbered independently.
///
/// Two descriptors sharing an `original_index` are rejected with
/// [`CoreError::DuplicateIndex`].
pub fn sequence_category(
    destination_root: &Path,
    category: Category,
    mut descriptors: Vec<SourceDescriptor>,
) -> CoreResult<Catalog> {
    debug_assert!(descriptors.iter().all(|d| d.category == category));

    descriptors.sort_by_key(|d| d.original_index);
    check_unique_indices(category, &descriptors)?;

    let entries = descriptors
        .into_iter()
        .enumerate()
        .map(|(position, source)| {
            let destination_index = position + 1;
            let destination_name = normalize_name(&source.original_name);
            let destination_path =
                destination_path(destination_root, category, destination_index, &destination_name);
            CatalogEntry {
                source,
                destination_index,
                destination_name,
                destination_path,
            }
        })
        .collect();

    Ok(Catalog::new(category, entries))
}

/// Expects `descriptors` sorted by index.
fn check_unique_indices(category: Category, descriptors: &[SourceDescriptor]) -> CoreResult<()> {
    match descriptors
        .windows(2)
        .find(|pair| pair[0].original_index == pair[1].original_index)
    {
        Some(pair) => Err(CoreError::DuplicateIndex {
            category: category.to_string(),
            index: pair[0].original_index,
            first: pair[0].original_path.display().to_string(),
            second: pair[1].original_path.display().to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "sequencer_test.rs"]
mod tests;
