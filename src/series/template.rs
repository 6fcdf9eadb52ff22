use crate::series::{GroupId, SeriesLayout};
use crate::ConfigError;

/// Placeholders understood by `UrlTemplate`
pub const PLACEHOLDERS: [&str; 3] = ["{group}", "{start}", "{end}"];

/// URL pattern for one archive of the series
///
/// `{group}` is replaced by the zero-padded group number, `{start}` and
/// `{end}` by the zero-padded first and last entry id of the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    pattern: String,
}

impl UrlTemplate {
    /// Creates a template, rejecting patterns with no placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self, ConfigError> {
        let pattern = pattern.into();
        if !PLACEHOLDERS.iter().any(|p| pattern.contains(p)) {
            return Err(ConfigError::InvalidTemplate(format!(
                "'{}' contains none of {}",
                pattern,
                PLACEHOLDERS.join(", ")
            )));
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Renders the fetch URL for a group
    ///
    /// # Example
    ///
    /// ```
    /// use infohash_catalog::series::{GroupId, SeriesLayout, UrlTemplate};
    ///
    /// let layout = SeriesLayout {
    ///     max_group: GroupId(999),
    ///     group_width: 3,
    ///     entries_per_group: 100_000,
    /// };
    /// let template = UrlTemplate::new("http://host/sm_{group}00000-{group}99999.torrent").unwrap();
    /// assert_eq!(
    ///     template.render(&layout, GroupId(7)),
    ///     "http://host/sm_00700000-00799999.torrent"
    /// );
    /// ```
    pub fn render(&self, layout: &SeriesLayout, group: GroupId) -> String {
        let range = layout.range(group);
        self.pattern
            .replace("{group}", &layout.padded_group(group))
            .replace("{start}", &range.padded_start())
            .replace("{end}", &range.padded_end())
    }
}
