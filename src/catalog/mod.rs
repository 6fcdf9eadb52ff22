//! Catalog of archive fingerprints
//!
//! This module handles:
//! - The in-memory `Catalog` (group to fingerprint)
//! - Resume point and gap computation
//! - JSON persistence behind the `CatalogStore` trait

mod json;
mod traits;

pub use json::{parse_catalog, render_catalog, JsonCatalogStore};
pub use traits::{CatalogStore, StorageError, StorageResult};

use crate::fingerprint::Fingerprint;
use crate::series::GroupId;
use std::collections::BTreeMap;

/// Mapping from group to fingerprint, ordered by group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<GroupId, Fingerprint>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, group: GroupId) -> Option<&Fingerprint> {
        self.entries.get(&group)
    }

    pub fn contains(&self, group: GroupId) -> bool {
        self.entries.contains_key(&group)
    }

    /// Records a fingerprint, returning the entry it replaced
    pub fn insert(&mut self, group: GroupId, fingerprint: Fingerprint) -> Option<Fingerprint> {
        self.entries.insert(group, fingerprint)
    }

    /// Highest cataloged group and its fingerprint
    pub fn last(&self) -> Option<(GroupId, &Fingerprint)> {
        self.entries.iter().next_back().map(|(g, fp)| (*g, fp))
    }

    /// First group that has not been cataloged yet
    ///
    /// This is one past the highest key, or group 0 for an empty catalog.
    /// Gaps below the highest key are not revisited. Returns `None` when the
    /// highest key is `u32::MAX`.
    pub fn resume_point(&self) -> Option<GroupId> {
        match self.last() {
            Some((group, _)) => group.next(),
            None => Some(GroupId::ZERO),
        }
    }

    /// Groups missing between 0 and the highest cataloged group
    pub fn gaps(&self) -> Vec<GroupId> {
        let Some((last, _)) = self.last() else {
            return Vec::new();
        };
        (0..last.0)
            .map(GroupId)
            .filter(|g| !self.entries.contains_key(g))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Fingerprint)> {
        self.entries.iter().map(|(g, fp)| (*g, fp))
    }
}

impl FromIterator<(GroupId, Fingerprint)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (GroupId, Fingerprint)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
