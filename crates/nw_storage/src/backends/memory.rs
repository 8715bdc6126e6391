use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use nw_core::{CatalogStore, Result, ScanPage, ScanToken, StoreItem};
use tokio::sync::RwLock;

/// In-memory catalog store, the reference backend for local runs and tests.
///
/// Items live in a key-ordered map, which gives scans stable continuation
/// tokens (resume exclusively past the last returned key) without any
/// recency bias: identities are opaque tokens, so key order is unrelated to
/// publication time.
#[derive(Default, Clone)]
pub struct MemoryStore {
    items: Arc<RwLock<BTreeMap<String, StoreItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently stored.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn put(&self, key: &str, item: StoreItem) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(key.to_string(), item);
        Ok(())
    }

    async fn scan(&self, limit: usize, start_token: Option<ScanToken>) -> Result<ScanPage> {
        let items = self.items.read().await;
        let start = match start_token {
            Some(token) => Bound::Excluded(token),
            None => Bound::Unbounded,
        };

        let mut page: Vec<(&String, &StoreItem)> = items
            .range((start, Bound::Unbounded))
            .take(limit.saturating_add(1))
            .collect();
        let has_more = page.len() > limit;
        page.truncate(limit);

        let next_token = if has_more {
            page.last().map(|(key, _)| (*key).clone())
        } else {
            None
        };

        Ok(ScanPage {
            items: page.into_iter().map(|(_, item)| item.clone()).collect(),
            next_token,
        })
    }
}
