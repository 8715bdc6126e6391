use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use nw_core::{CatalogStore, Error, IdentityStrategy, Result};

use crate::fetch::{FeedFetcher, DEFAULT_FETCH_TIMEOUT};
use crate::normalize::normalize_entry;
use crate::parse::parse_feed;
use crate::report::{IngestionReport, SourceFailure};
use crate::sources::{default_sources, FeedSource};

/// How many sources are fetched at the same time.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;

const WRITE_ATTEMPTS: u32 = 3;
const WRITE_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct IngestorConfig {
    pub sources: Vec<FeedSource>,
    pub identity: IdentityStrategy,
    pub max_concurrent_fetches: usize,
    pub fetch_timeout: Duration,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            identity: IdentityStrategy::default(),
            max_concurrent_fetches: DEFAULT_FETCH_CONCURRENCY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Pulls every configured feed, normalizes the entries and upserts them into
/// the catalog store.
///
/// A run never fails as a whole: each source is fetched, parsed and written
/// in isolation, and whatever goes wrong with one source lands in the report
/// while the others proceed.
pub struct Ingestor {
    store: Arc<dyn CatalogStore>,
    fetcher: FeedFetcher,
    config: IngestorConfig,
}

impl Ingestor {
    pub fn new(store: Arc<dyn CatalogStore>, config: IngestorConfig) -> Result<Self> {
        let fetcher = FeedFetcher::with_timeout(config.fetch_timeout)?;
        Ok(Self {
            store,
            fetcher,
            config,
        })
    }

    /// Ingest all configured sources and report the outcome.
    ///
    /// Sources are processed with bounded concurrency; the report lists
    /// failures in configuration order regardless of completion order.
    pub async fn run(&self) -> IngestionReport {
        let concurrency = self.config.max_concurrent_fetches.max(1);
        let outcomes: Vec<SourceOutcome> = stream::iter(self.config.sources.iter())
            .map(|source| self.ingest_source(source))
            .buffered(concurrency)
            .collect()
            .await;

        let mut report = IngestionReport::default();
        for outcome in outcomes {
            report.stored += outcome.stored;
            if let Some(failure) = outcome.failure {
                report.failures.push(failure);
            }
        }

        tracing::info!("{}", report.status_line());
        report
    }

    async fn ingest_source(&self, source: &FeedSource) -> SourceOutcome {
        tracing::info!("ingesting {} from {}", source.name, source.url);

        let bytes = match self.fetcher.fetch(&source.url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("failed to fetch {}: {}", source.name, e);
                return SourceOutcome::failed(source, e);
            }
        };

        let entries = match parse_feed(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("failed to parse {}: {}", source.name, e);
                return SourceOutcome::failed(source, e);
            }
        };
        tracing::debug!("parsed {} entries from {}", entries.len(), source.name);

        let mut stored = 0;
        for entry in &entries {
            let article = normalize_entry(entry, &source.name, self.config.identity);
            if let Err(e) = self.put_with_retry(&article.id, article.to_item()).await {
                tracing::error!("aborting {} after write failure: {}", source.name, e);
                return SourceOutcome {
                    stored,
                    failure: Some(SourceFailure::new(source.name.as_str(), e.to_string())),
                };
            }
            stored += 1;
        }

        tracing::info!("stored {} articles from {}", stored, source.name);
        SourceOutcome {
            stored,
            failure: None,
        }
    }

    async fn put_with_retry(&self, key: &str, item: nw_core::StoreItem) -> Result<()> {
        let mut attempt = 1u32;
        loop {
            match self.store.put(key, item.clone()).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempt < WRITE_ATTEMPTS => {
                    let backoff = WRITE_BACKOFF * 2u32.pow(attempt - 1);
                    tracing::warn!(
                        "write attempt {}/{} for {} failed: {}; retrying in {:?}",
                        attempt,
                        WRITE_ATTEMPTS,
                        key,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

struct SourceOutcome {
    stored: usize,
    failure: Option<SourceFailure>,
}

impl SourceOutcome {
    fn failed(source: &FeedSource, err: Error) -> Self {
        Self {
            stored: 0,
            failure: Some(SourceFailure::new(source.name.as_str(), err.to_string())),
        }
    }
}
