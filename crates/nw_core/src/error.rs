use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // The feed identifier must not be named `source`: thiserror would
    // treat that field as the error's cause and require it to be an error.
    #[error("Feed error for {feed}: {reason}")]
    FeedFetch { feed: String, reason: String },

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Store write failed: {message}")]
    StoreWrite { message: String, transient: bool },

    #[error("Store read failed: {0}")]
    StoreRead(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Helper: build a `FeedFetch` error for the thing being fetched.
    pub fn feed_fetch(feed: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FeedFetch {
            feed: feed.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `StoreWrite` error, flagged transient when a retry
    /// with backoff is worth attempting.
    pub fn store_write(message: impl Into<String>, transient: bool) -> Self {
        Self::StoreWrite {
            message: message.into(),
            transient,
        }
    }

    /// True for failures that may clear on their own (throttling, a
    /// momentarily unavailable store) and are therefore retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::StoreWrite { transient: true, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
