use async_trait::async_trait;

use crate::item::StoreItem;
use crate::Result;

/// Opaque continuation token: an exclusive start position for resuming a
/// scan past the last item a previous page returned.
pub type ScanToken = String;

/// One page of an unordered bulk read.
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<StoreItem>,
    /// Present when the store holds more items past this page.
    pub next_token: Option<ScanToken>,
}

/// The shared catalog holding every ingested article, keyed by identity.
///
/// The store is the sole source of truth between invocations; callers keep
/// only request-scoped copies of what they read or wrote.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Idempotent upsert keyed by article identity. Overwrites on key
    /// collision.
    async fn put(&self, key: &str, item: StoreItem) -> Result<()>;

    /// Unordered bulk read of up to `limit` items, resumable via the
    /// returned continuation token. Carries no recency bias: the page is
    /// whatever subset the store surfaces first.
    async fn scan(&self, limit: usize, start_token: Option<ScanToken>) -> Result<ScanPage>;
}
