//! Crawler coordinator - the discovery and verification loop
//!
//! This module walks the series one group at a time:
//! - Determining the resume point from the catalog
//! - Rendering and fetching each group's URL
//! - Fingerprinting each archive and recording it
//! - Stopping at the end of the series or at the identifier bound

use crate::bencode::MetainfoCodec;
use crate::catalog::Catalog;
use crate::crawler::fetcher::{ArchiveSource, FetchOutcome};
use crate::fingerprint::Fingerprint;
use crate::series::{GroupId, SeriesLayout, UrlTemplate};
use crate::CatalogError;
use std::fmt;

/// How a crawl that did not fail came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The group was not published; it and everything after stay uncataloged
    EndOfSeries(GroupId),

    /// The highest addressable group was fetched and recorded
    BoundReached(GroupId),

    /// The catalog already extends to the highest addressable group
    AlreadyComplete,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfSeries(group) => write!(f, "end of series at group {}", group),
            Self::BoundReached(group) => write!(f, "upper bound reached at group {}", group),
            Self::AlreadyComplete => write!(f, "catalog already complete"),
        }
    }
}

/// Everything a crawl produced
///
/// The catalog is returned even when `outcome` is an error so the caller can
/// persist the groups that were recorded before the failure.
#[derive(Debug)]
pub struct CrawlReport {
    pub catalog: Catalog,

    /// Groups recorded during this run, in processing order
    pub recorded: Vec<GroupId>,

    pub outcome: Result<Termination, CatalogError>,
}

/// Drives the crawl over one archive source
pub struct Crawler<S, C> {
    source: S,
    codec: C,
    template: UrlTemplate,
    layout: SeriesLayout,
}

impl<S, C> Crawler<S, C>
where
    S: ArchiveSource,
    C: MetainfoCodec,
{
    pub fn new(source: S, codec: C, template: UrlTemplate, layout: SeriesLayout) -> Self {
        Self {
            source,
            codec,
            template,
            layout,
        }
    }

    /// Resume point for `catalog`, logging where the previous run stopped
    ///
    /// Returns `None` when the catalog already covers the identifier bound.
    pub fn resume_from(&self, catalog: &Catalog) -> Option<GroupId> {
        match catalog.last() {
            Some((group, fingerprint)) => {
                tracing::info!(
                    "last archive: {}  ({})",
                    self.layout.range(group),
                    fingerprint
                );
            }
            None => {
                tracing::warn!(
                    "catalog is empty, starting from group {}",
                    self.layout.padded_group(GroupId::ZERO)
                );
            }
        }

        catalog
            .resume_point()
            .filter(|group| *group <= self.layout.max_group)
    }

    /// Runs the crawl loop
    ///
    /// Groups are processed strictly in increasing order from the resume
    /// point. The loop stops at the first 404, after the bound group, or at
    /// the first transport or decode failure. A failed group is never
    /// recorded; groups recorded before it are kept in the returned catalog.
    pub async fn run(&self, mut catalog: Catalog) -> CrawlReport {
        let mut recorded = Vec::new();

        let Some(start) = self.resume_from(&catalog) else {
            tracing::warn!(
                "catalog already reaches group {}; the numbering scheme needs extending to go further",
                self.layout.padded_group(self.layout.max_group)
            );
            return CrawlReport {
                catalog,
                recorded,
                outcome: Ok(Termination::AlreadyComplete),
            };
        };

        for group in self.layout.groups_from(start) {
            let fingerprint = match self.process_group(group).await {
                Ok(Some(fingerprint)) => fingerprint,
                Ok(None) => {
                    return CrawlReport {
                        catalog,
                        recorded,
                        outcome: Ok(Termination::EndOfSeries(group)),
                    };
                }
                Err(e) => {
                    return CrawlReport {
                        catalog,
                        recorded,
                        outcome: Err(e),
                    };
                }
            };

            tracing::info!("got: {}  ({})", self.layout.range(group), fingerprint);
            if let Some(stale) = catalog.insert(group, fingerprint.clone()) {
                if stale != fingerprint {
                    tracing::warn!(
                        "group {} changed fingerprint: {} -> {}",
                        group,
                        stale,
                        fingerprint
                    );
                }
            }
            recorded.push(group);

            if group == self.layout.max_group {
                tracing::warn!(
                    "archive for group {} fetched; it is the last group the numbering scheme can address",
                    self.layout.padded_group(group)
                );
                tracing::warn!("later archives, if published, will NOT be cataloged");
            }
        }

        CrawlReport {
            catalog,
            recorded,
            outcome: Ok(Termination::BoundReached(self.layout.max_group)),
        }
    }

    /// Fetches and fingerprints one group
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Fingerprint))` - The archive was fetched and fingerprinted
    /// * `Ok(None)` - The archive is not published (end of series)
    /// * `Err(CatalogError)` - Transport or decode failure
    async fn process_group(&self, group: GroupId) -> Result<Option<Fingerprint>, CatalogError> {
        let url = self.template.render(&self.layout, group);

        match self.source.fetch(group, &url).await {
            FetchOutcome::Success(blob) => {
                tracing::debug!("Group {}: {} bytes", group, blob.len());
                Fingerprint::compute(&self.codec, &blob)
                    .map(Some)
                    .map_err(|source| CatalogError::Decode { group, source })
            }
            FetchOutcome::NotFound => {
                tracing::info!("404: {}", self.layout.range(group));
                tracing::info!("end of series");
                Ok(None)
            }
            FetchOutcome::TransportFailure(detail) => Err(CatalogError::Transport {
                group,
                url,
                detail,
            }),
        }
    }
}
