//! Crawler module for archive discovery and verification
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with end-of-series detection
//! - The sequential group-by-group crawl loop
//! - The load, crawl, save cycle around the catalog store

mod coordinator;
mod fetcher;

pub use coordinator::{CrawlReport, Crawler, Termination};
pub use fetcher::{build_http_client, fetch_archive, ArchiveSource, FetchOutcome, HttpSource};

use crate::bencode::BencodeCodec;
use crate::catalog::CatalogStore;
use crate::config::{validate, Config};
use crate::CatalogError;

/// Runs a complete catalog update
///
/// This is the main entry point for an update. It will:
/// 1. Validate the configuration and load the catalog from the store
/// 2. Build the HTTP client
/// 3. Crawl forward from the resume point
/// 4. Save the catalog, including partial progress after a failure
/// 5. Return the termination, or the error that stopped the crawl
///
/// # Arguments
///
/// * `config` - The catalog configuration
/// * `store` - Where the catalog is loaded from and saved to
///
/// # Returns
///
/// * `Ok(Termination)` - Crawl ended normally and the catalog was saved
/// * `Err(CatalogError)` - Crawl or storage failed
pub async fn update_catalog<T: CatalogStore>(
    config: &Config,
    store: &T,
) -> Result<Termination, CatalogError> {
    validate(config)?;

    let catalog = store.load()?;
    tracing::debug!("Loaded {} catalog entries", catalog.len());

    let source = HttpSource::from_config(config)?;
    let crawler = Crawler::new(
        source,
        BencodeCodec,
        config.source.template()?,
        config.source.layout(),
    );

    let report = crawler.run(catalog).await;
    save_report(store, &report)?;

    let termination = report.outcome?;
    tracing::info!(
        "catalog updated: {} new entries, {} total ({})",
        report.recorded.len(),
        report.catalog.len(),
        termination
    );
    Ok(termination)
}

/// Persists whatever the crawl recorded
///
/// The catalog is written back even when the crawl failed, so the groups
/// recorded before the failure survive. A save error is only returned when
/// the crawl itself succeeded; otherwise it is logged and the crawl error wins.
fn save_report<T: CatalogStore>(store: &T, report: &CrawlReport) -> Result<(), CatalogError> {
    match (store.save(&report.catalog), &report.outcome) {
        (Ok(()), _) => Ok(()),
        (Err(e), Ok(_)) => Err(e.into()),
        (Err(e), Err(_)) => {
            tracing::error!("Failed to save catalog after crawl error: {}", e);
            Ok(())
        }
    }
}
