//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests for archive blobs
//! - Classifying responses into success, end of series, or failure

use crate::config::Config;
use crate::series::GroupId;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The archive was fetched
    Success(Vec<u8>),

    /// No archive is published at this URL (HTTP 404)
    NotFound,

    /// Any other failure: non-success status, connection error, timeout
    TransportFailure(String),
}

/// Anything that can deliver the archive blob for a group
///
/// The crawler awaits each fetch to completion before asking for the next
/// group, so implementations never see overlapping calls.
pub trait ArchiveSource {
    fn fetch(&self, group: GroupId, url: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The catalog configuration (user agent and timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.source.timeout_secs))
        .connect_timeout(Duration::from_secs(config.source.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one archive blob
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | HTTP 2xx | Success |
/// | HTTP 404 | NotFound |
/// | Any other status | TransportFailure |
/// | Timeout, connection or body error | TransportFailure |
pub async fn fetch_archive(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::TransportFailure(classify_error(&e)),
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return FetchOutcome::NotFound;
    }
    if !status.is_success() {
        return FetchOutcome::TransportFailure(format!("HTTP {}", status));
    }

    match response.bytes().await {
        Ok(body) => FetchOutcome::Success(body.to_vec()),
        Err(e) => FetchOutcome::TransportFailure(format!(
            "Failed to read body: {}",
            classify_error(&e)
        )),
    }
}

fn classify_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    }
}

/// `ArchiveSource` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        build_http_client(config).map(Self::new)
    }
}

impl ArchiveSource for HttpSource {
    async fn fetch(&self, group: GroupId, url: &str) -> FetchOutcome {
        tracing::debug!("Fetching group {} from {}", group, url);
        fetch_archive(&self.client, url).await
    }
}
