//! Output module for operator-facing reports
//!
//! This module handles:
//! - Catalog coverage statistics
//! - Resolving entry ids to archives

pub mod stats;

pub use stats::{load_statistics, print_statistics, CatalogStatistics};

use crate::catalog::Catalog;
use crate::fingerprint::Fingerprint;
use crate::series::{GroupId, SeriesLayout};
use crate::CatalogError;

/// Where an entry id can be found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLocation {
    pub entry_id: u64,
    pub group: GroupId,
    pub fingerprint: Fingerprint,
}

/// Resolves an entry id to the archive that contains it
///
/// # Returns
///
/// * `Ok(EntryLocation)` - The group is cataloged
/// * `Err(CatalogError::NotCataloged)` - The group is missing from the catalog
/// * `Err(CatalogError::EntryOutOfRange)` - The id is beyond the numbering scheme
pub fn locate_entry(
    catalog: &Catalog,
    layout: &SeriesLayout,
    entry_id: u64,
) -> Result<EntryLocation, CatalogError> {
    let group = layout
        .group_of(entry_id)
        .ok_or(CatalogError::EntryOutOfRange {
            entry_id,
            max_group: layout.max_group,
        })?;

    let fingerprint = catalog
        .get(group)
        .cloned()
        .ok_or(CatalogError::NotCataloged(group))?;

    Ok(EntryLocation {
        entry_id,
        group,
        fingerprint,
    })
}

/// Prints an entry location to stdout
pub fn print_location(location: &EntryLocation, layout: &SeriesLayout) {
    println!(
        "Entry {} is in group {} ({})",
        location.entry_id,
        layout.padded_group(location.group),
        layout.range(location.group)
    );
    println!("  Fingerprint: {}", location.fingerprint);
    println!("  Magnet: {}", location.fingerprint.magnet_link());
}
