use crate::series::{GroupId, SeriesLayout, UrlTemplate};
use crate::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_URL_TEMPLATE: &str =
    "http://gen.lib.rus.ec/scimag/repository_torrent/sm_{group}00000-{group}99999.torrent";
pub const DEFAULT_CATALOG_PATH: &str = "assets/torrents.json";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Where and how archives are fetched
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL pattern with `{group}`, `{start}` or `{end}` placeholders
    #[serde(rename = "url-template")]
    pub url_template: String,

    /// Highest group the numbering scheme can address
    #[serde(rename = "max-group")]
    pub max_group: u32,

    /// Zero-padding width of a group number
    #[serde(rename = "group-width")]
    pub group_width: usize,

    /// Entry ids covered by one archive
    #[serde(rename = "entries-per-group")]
    pub entries_per_group: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

/// Catalog file location
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            max_group: 999,
            group_width: 3,
            entries_per_group: 100_000,
            timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CATALOG_PATH),
        }
    }
}

impl SourceConfig {
    pub fn layout(&self) -> SeriesLayout {
        SeriesLayout {
            max_group: GroupId(self.max_group),
            group_width: self.group_width,
            entries_per_group: self.entries_per_group,
        }
    }

    pub fn template(&self) -> Result<UrlTemplate, ConfigError> {
        UrlTemplate::new(self.url_template.as_str())
    }
}

impl UserAgentConfig {
    /// Format: Name/Version
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}
