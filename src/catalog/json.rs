//! JSON catalog file
//!
//! The catalog is a single JSON object whose keys are decimal group numbers
//! and whose values are lowercase hex fingerprints, indented by two spaces.

use crate::catalog::traits::{CatalogStore, StorageError, StorageResult};
use crate::catalog::Catalog;
use crate::fingerprint::Fingerprint;
use crate::series::GroupId;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Catalog stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load(&self) -> StorageResult<Catalog> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_catalog(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Catalog file {} does not exist", self.path.display());
                Ok(Catalog::new())
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Writes to a temporary file next to the target, then renames it over
    /// the target so a crash never leaves a half-written catalog.
    fn save(&self, catalog: &Catalog) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let rendered = render_catalog(catalog)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(rendered.as_bytes())
            .map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(
            "Wrote {} catalog entries to {}",
            catalog.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Parses catalog JSON
///
/// Empty or whitespace-only input is an empty catalog. Keys must be plain
/// decimal group numbers (no sign, no leading zeros).
pub fn parse_catalog(content: &str) -> StorageResult<Catalog> {
    if content.trim().is_empty() {
        return Ok(Catalog::new());
    }

    let raw: BTreeMap<String, String> = serde_json::from_str(content)?;

    raw.into_iter()
        .map(|(key, value)| -> StorageResult<(GroupId, Fingerprint)> {
            let group = key
                .parse::<GroupId>()
                .ok()
                .filter(|g| g.to_string() == key)
                .ok_or_else(|| StorageError::InvalidKey(key.clone()))?;
            let fingerprint = value
                .parse::<Fingerprint>()
                .map_err(|source| StorageError::InvalidFingerprint { key, source })?;
            Ok((group, fingerprint))
        })
        .collect()
}

/// Renders catalog JSON: ascending group order, two-space indent, trailing newline
pub fn render_catalog(catalog: &Catalog) -> StorageResult<String> {
    let ordered: BTreeMap<GroupId, &Fingerprint> = catalog.iter().collect();
    let mut rendered = serde_json::to_string_pretty(&ordered)?;
    rendered.push('\n');
    Ok(rendered)
}
