pub mod fetch;
pub mod ingestor;
pub mod normalize;
pub mod parse;
pub mod report;
pub mod sources;

pub use fetch::{FeedFetcher, DEFAULT_FETCH_TIMEOUT};
pub use ingestor::{Ingestor, IngestorConfig, DEFAULT_FETCH_CONCURRENCY};
pub use normalize::normalize_entry;
pub use parse::{parse_feed, FeedEntry};
pub use report::{IngestionReport, SourceFailure};
pub use sources::{default_sources, load_sources, FeedSource};

pub mod prelude {
    pub use super::{FeedFetcher, FeedSource, IngestionReport, Ingestor, IngestorConfig};
    pub use nw_core::{Article, Error, Result};
}
