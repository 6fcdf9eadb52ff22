//! infohash-catalog: an incremental catalog of a numbered torrent series
//!
//! This crate walks a sequentially numbered series of remote metainfo files,
//! fingerprints each one by the SHA-1 of its canonical `info` dictionary, and
//! keeps a JSON catalog mapping group number to fingerprint.

pub mod bencode;
pub mod catalog;
pub mod config;
pub mod crawler;
pub mod fingerprint;
pub mod output;
pub mod series;

use thiserror::Error;

/// Main error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] catalog::StorageError),

    #[error("Transport error for group {group} ({url}): {detail}")]
    Transport {
        group: series::GroupId,
        url: String,
        detail: String,
    },

    #[error("Failed to decode archive for group {group}: {source}")]
    Decode {
        group: series::GroupId,
        source: bencode::DecodeError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Group {0} is not in the catalog")]
    NotCataloged(series::GroupId),

    #[error("Entry {entry_id} is beyond the last addressable group {max_group}")]
    EntryOutOfRange {
        entry_id: u64,
        max_group: series::GroupId,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL template: {0}")]
    InvalidTemplate(String),
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::Config;
pub use fingerprint::Fingerprint;
pub use series::GroupId;
