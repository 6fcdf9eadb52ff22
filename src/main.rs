//! infohash-catalog main entry point
//!
//! This is the command-line interface for the archive catalog updater.

use anyhow::Context;
use clap::Parser;
use infohash_catalog::catalog::{CatalogStore, JsonCatalogStore};
use infohash_catalog::config::{load_config_with_hash, Config};
use infohash_catalog::crawler::update_catalog;
use infohash_catalog::output::{load_statistics, locate_entry, print_location, print_statistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// infohash-catalog: keeps a fingerprint catalog of a numbered torrent series
///
/// Each run resumes after the highest cataloged group, fetches archives until
/// the series ends (HTTP 404) or the numbering scheme runs out, and records
/// the info hash of every archive it fetched.
#[derive(Parser, Debug)]
#[command(name = "infohash-catalog")]
#[command(version)]
#[command(about = "Incremental info hash catalog for a numbered torrent series", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Catalog file, overriding the configured path
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resume point and next URL without fetching anything
    #[arg(long, conflicts_with_all = ["stats", "lookup"])]
    dry_run: bool,

    /// Show catalog statistics and exit
    #[arg(long, conflicts_with_all = ["dry_run", "lookup"])]
    stats: bool,

    /// Print the archive fingerprint for an entry id and exit
    #[arg(long, value_name = "ENTRY_ID", conflicts_with_all = ["dry_run", "stats"])]
    lookup: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(path) = cli.catalog {
        config.catalog.path = path;
    }

    let store = JsonCatalogStore::new(&config.catalog.path);

    if cli.dry_run {
        handle_dry_run(&config, &store)
    } else if cli.stats {
        handle_stats(&config, &store)
    } else if let Some(entry_id) = cli.lookup {
        handle_lookup(&config, &store, entry_id)
    } else {
        handle_update(&config, &store).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("infohash_catalog=info,warn"),
            1 => EnvFilter::new("infohash_catalog=debug,info"),
            2 => EnvFilter::new("infohash_catalog=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows where the next crawl would start
fn handle_dry_run(config: &Config, store: &JsonCatalogStore) -> anyhow::Result<()> {
    let catalog = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let layout = config.source.layout();
    let template = config.source.template()?;

    println!("=== infohash-catalog Dry Run ===\n");

    println!("Source:");
    println!("  URL template: {}", template.pattern());
    println!("  Highest group: {}", layout.padded_group(layout.max_group));
    println!("  Entries per group: {}", layout.entries_per_group);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.source.timeout_secs, config.source.connect_timeout_secs
    );
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nCatalog:");
    println!("  Path: {}", store.path().display());
    println!("  Entries: {}", catalog.len());
    if let Some((group, fingerprint)) = catalog.last() {
        println!("  Last archive: {}  ({})", layout.range(group), fingerprint);
    }

    match catalog
        .resume_point()
        .filter(|group| *group <= layout.max_group)
    {
        Some(group) => {
            println!("\n✓ Would start at group {}", layout.padded_group(group));
            println!("✓ First URL: {}", template.render(&layout, group));
        }
        None => println!("\n✓ Catalog already reaches the highest group; nothing to fetch"),
    }

    Ok(())
}

/// Handles the --stats mode: shows catalog coverage
fn handle_stats(config: &Config, store: &JsonCatalogStore) -> anyhow::Result<()> {
    println!("Catalog: {}\n", store.path().display());

    let catalog = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let layout = config.source.layout();

    print_statistics(&load_statistics(&catalog, &layout), &layout);

    Ok(())
}

/// Handles the --lookup mode: maps an entry id to its archive
fn handle_lookup(config: &Config, store: &JsonCatalogStore, entry_id: u64) -> anyhow::Result<()> {
    let catalog = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let layout = config.source.layout();

    let location = locate_entry(&catalog, &layout, entry_id)?;
    print_location(&location, &layout);

    Ok(())
}

/// Handles the main update operation
async fn handle_update(config: &Config, store: &JsonCatalogStore) -> anyhow::Result<()> {
    tracing::info!("Updating catalog {}", store.path().display());

    match update_catalog(config, store).await {
        Ok(termination) => {
            tracing::info!("updated, all OK ({})", termination);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Update failed: {}", e);
            Err(e.into())
        }
    }
}
