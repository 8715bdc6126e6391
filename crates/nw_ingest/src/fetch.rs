use std::time::Duration;

use nw_core::{Error, Result};

/// Per-source fetch timeout. One unresponsive feed must not consume the
/// whole invocation budget.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP fetcher for syndication documents.
pub struct FeedFetcher {
    client: reqwest::Client,
}

impl FeedFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetch the raw feed document at `url`. Non-success statuses are
    /// reported as fetch failures rather than handing an error page to the
    /// parser.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("fetching feed from {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::feed_fetch(url, format!("HTTP {}", status)));
        }
        let bytes = response.bytes().await?;
        tracing::debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn fetches_feed_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/rss.xml");
                then.status(200)
                    .header("content-type", "application/rss+xml")
                    .body("<rss></rss>");
            })
            .await;

        let fetcher = FeedFetcher::new().unwrap();
        let body = fetcher.fetch(&server.url("/rss.xml")).await.unwrap();
        assert_eq!(body, b"<rss></rss>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rss.xml");
                then.status(404);
            })
            .await;

        let fetcher = FeedFetcher::new().unwrap();
        let err = fetcher.fetch(&server.url("/rss.xml")).await.unwrap_err();
        assert!(matches!(err, Error::FeedFetch { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        let fetcher = FeedFetcher::with_timeout(Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/rss.xml").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
