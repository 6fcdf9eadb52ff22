//! Storage traits and error types
//!
//! This module defines the trait interface for catalog backends and
//! associated error types.

use crate::catalog::Catalog;
use crate::fingerprint::InvalidFingerprint;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during catalog storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Catalog key {0:?} is not a group number")]
    InvalidKey(String),

    #[error("Catalog entry {key}: {source}")]
    InvalidFingerprint {
        key: String,
        source: InvalidFingerprint,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for catalog persistence backends
///
/// The crawler never touches storage directly: the caller loads a catalog,
/// hands it to the crawler, and saves whatever comes back.
pub trait CatalogStore {
    /// Loads the persisted catalog
    ///
    /// A missing or empty resource is an empty catalog, not an error.
    fn load(&self) -> StorageResult<Catalog>;

    /// Replaces the persisted catalog with `catalog`
    fn save(&self, catalog: &Catalog) -> StorageResult<()>;
}
