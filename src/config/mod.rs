//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; the defaults describe the original torrent series.
//!
//! # Example
//!
//! ```no_run
//! use infohash_catalog::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("catalog.toml")).unwrap();
//! println!("Highest group: {}", config.source.max_group);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, SourceConfig, UserAgentConfig, DEFAULT_CATALOG_PATH,
    DEFAULT_URL_TEMPLATE,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
