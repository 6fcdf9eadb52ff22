use crate::series::GroupId;
use std::fmt;

/// Numbering scheme of the series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesLayout {
    /// Highest group the scheme can address
    pub max_group: GroupId,

    /// Digits used when a group number is zero-padded
    pub group_width: usize,

    /// Number of entry ids covered by one group
    pub entries_per_group: u64,
}

/// Entry id range covered by one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRange {
    pub group: GroupId,
    pub start: u64,
    pub end: u64,
    width: usize,
}

impl SeriesLayout {
    /// Zero-padded group number, e.g. `007`
    pub fn padded_group(&self, group: GroupId) -> String {
        format!("{:0width$}", group.0, width = self.group_width)
    }

    /// Width of a zero-padded entry id
    pub fn entry_width(&self) -> usize {
        let per_group_digits = match self.entries_per_group.saturating_sub(1) {
            0 => 0,
            n => n.to_string().len(),
        };
        self.group_width + per_group_digits
    }

    /// Entry range of a group
    pub fn range(&self, group: GroupId) -> GroupRange {
        let start = u64::from(group.0).saturating_mul(self.entries_per_group);
        let end = start.saturating_add(self.entries_per_group.saturating_sub(1));
        GroupRange {
            group,
            start,
            end,
            width: self.entry_width(),
        }
    }

    /// Group that contains an entry id, if the scheme can address it
    pub fn group_of(&self, entry_id: u64) -> Option<GroupId> {
        GroupId::containing(entry_id, self.entries_per_group).filter(|g| *g <= self.max_group)
    }

    /// Groups from `from` through `max_group`, in increasing order
    pub fn groups_from(&self, from: GroupId) -> impl Iterator<Item = GroupId> {
        (from.0..=self.max_group.0).map(GroupId)
    }
}

impl GroupRange {
    pub fn padded_start(&self) -> String {
        format!("{:0width$}", self.start, width = self.width)
    }

    pub fn padded_end(&self) -> String {
        format!("{:0width$}", self.end, width = self.width)
    }
}

impl fmt::Display for GroupRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.padded_start(), self.padded_end())
    }
}
