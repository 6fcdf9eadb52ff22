//! Statistics generation from a catalog
//!
//! This module provides functionality for summarising catalog coverage
//! and displaying it.

use crate::catalog::Catalog;
use crate::series::{GroupId, SeriesLayout};

/// Catalog coverage summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStatistics {
    /// Number of cataloged groups
    pub total_entries: usize,

    /// Lowest cataloged group
    pub first_group: Option<GroupId>,

    /// Highest cataloged group
    pub last_group: Option<GroupId>,

    /// Groups missing below the highest one
    pub gaps: Vec<GroupId>,

    /// Highest group the numbering scheme can address
    pub max_group: GroupId,

    /// Next group a crawl would fetch, if any
    pub resume_point: Option<GroupId>,
}

impl CatalogStatistics {
    /// Fraction of the addressable groups that are cataloged, in percent
    pub fn coverage_percent(&self) -> f64 {
        let addressable = f64::from(self.max_group.0) + 1.0;
        (self.total_entries as f64 / addressable) * 100.0
    }
}

/// Computes statistics for a catalog
pub fn load_statistics(catalog: &Catalog, layout: &SeriesLayout) -> CatalogStatistics {
    CatalogStatistics {
        total_entries: catalog.len(),
        first_group: catalog.iter().next().map(|(g, _)| g),
        last_group: catalog.last().map(|(g, _)| g),
        gaps: catalog.gaps(),
        max_group: layout.max_group,
        resume_point: catalog
            .resume_point()
            .filter(|g| *g <= layout.max_group),
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CatalogStatistics, layout: &SeriesLayout) {
    println!("=== Catalog Statistics ===\n");

    println!("Overview:");
    println!("  Cataloged archives: {}", stats.total_entries);
    println!(
        "  Addressable groups: {} ({:.1}% cataloged)",
        u64::from(stats.max_group.0) + 1,
        stats.coverage_percent()
    );

    if let (Some(first), Some(last)) = (stats.first_group, stats.last_group) {
        println!(
            "  Covered entries: {} through {}",
            layout.range(first).padded_start(),
            layout.range(last).padded_end()
        );
        println!("  Highest group: {}", layout.padded_group(last));
    }
    println!();

    if !stats.gaps.is_empty() {
        println!("Gaps ({}):", stats.gaps.len());
        for group in &stats.gaps {
            println!("  - {}  ({})", layout.padded_group(*group), layout.range(*group));
        }
        println!();
    }

    match stats.resume_point {
        Some(group) => println!("Next crawl starts at group {}", layout.padded_group(group)),
        None => println!("Catalog reaches the highest addressable group"),
    }
}
