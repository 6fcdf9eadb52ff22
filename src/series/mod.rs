//! Archive series addressing
//!
//! This module provides group identifiers, the entry ranges they cover, and
//! the URL template that turns a group into a fetch URL.

mod layout;
mod template;

pub use layout::{GroupRange, SeriesLayout};
pub use template::{UrlTemplate, PLACEHOLDERS};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one archive in the series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u32);

impl GroupId {
    pub const ZERO: GroupId = GroupId(0);

    /// The following group, or `None` on overflow
    pub fn next(self) -> Option<GroupId> {
        self.0.checked_add(1).map(GroupId)
    }

    /// Group that covers `entry_id`
    ///
    /// Returns `None` if `entries_per_group` is zero or the group does not fit.
    pub fn containing(entry_id: u64, entries_per_group: u64) -> Option<GroupId> {
        let group = entry_id.checked_div(entries_per_group)?;
        u32::try_from(group).ok().map(GroupId)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GroupId {
    type Err = std::num::ParseIntError;

    /// Parses a plain decimal group number as used for catalog keys
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(GroupId)
    }
}
