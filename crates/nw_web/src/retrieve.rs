use nw_core::{compare_recency, Article, CatalogStore, Result};

/// Articles returned when the caller does not ask for a specific count.
pub const DEFAULT_LIMIT: usize = 50;
/// Hard cap on how many articles a single request may pull.
pub const MAX_LIMIT: usize = 200;

/// Fetch up to `limit` stored articles, most recent first.
///
/// The limit is clamped to `1..=MAX_LIMIT` before it reaches the store.
/// Records that no longer reconstruct as articles are logged and skipped
/// rather than failing the whole read. Articles without a known publication
/// date sort after every dated one.
pub async fn fetch_recent(store: &dyn CatalogStore, limit: usize) -> Result<Vec<Article>> {
    let limit = limit.clamp(1, MAX_LIMIT);
    let page = store.scan(limit, None).await?;

    let mut articles = Vec::with_capacity(page.items.len());
    for item in &page.items {
        match Article::from_item(item) {
            Ok(article) => articles.push(article),
            Err(e) => tracing::warn!("skipping malformed record: {}", e),
        }
    }

    articles.sort_by(compare_recency);
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use nw_core::{AttrValue, PUB_DATE_UNKNOWN};
    use nw_storage::MemoryStore;

    fn article(id: &str, pub_date: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("title-{}", id),
            link: format!("https://example.com/{}", id),
            source: "Test".to_string(),
            pub_date: pub_date.to_string(),
            description: "d".to_string(),
        }
    }

    async fn seed(store: &MemoryStore, articles: &[Article]) {
        for a in articles {
            store.put(&a.id, a.to_item()).await.unwrap();
        }
    }

    #[tokio::test]
    async fn returns_most_recent_first() {
        let store = MemoryStore::new();
        seed(
            &store,
            &[
                article("a", "2024-08-18T10:00:00Z"),
                article("b", "2024-08-20T10:00:00Z"),
                article("c", "2024-08-19T10:00:00Z"),
            ],
        )
        .await;

        let articles = fetch_recent(&store, 50).await.unwrap();
        let ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[tokio::test]
    async fn undated_articles_come_last() {
        let store = MemoryStore::new();
        seed(
            &store,
            &[
                article("na", PUB_DATE_UNKNOWN),
                article("dated", "2024-08-20T10:00:00Z"),
            ],
        )
        .await;

        let articles = fetch_recent(&store, 50).await.unwrap();
        assert_eq!(articles[0].id, "dated");
        assert_eq!(articles[1].id, "na");
    }

    #[tokio::test]
    async fn malformed_records_are_skipped() {
        let store = MemoryStore::new();
        seed(&store, &[article("good", "2024-08-20T10:00:00Z")]).await;

        // A record that lost its identity attribute.
        let mut orphan = HashMap::new();
        orphan.insert("title".to_string(), AttrValue::s("stray"));
        store.put("orphan", orphan).await.unwrap();

        let articles = fetch_recent(&store, 50).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id, "good");
    }

    #[tokio::test]
    async fn limit_is_honored_and_clamped() {
        let store = MemoryStore::new();
        let seeded: Vec<Article> = (0..5)
            .map(|i| article(&format!("id{}", i), "2024-08-20T10:00:00Z"))
            .collect();
        seed(&store, &seeded).await;

        assert_eq!(fetch_recent(&store, 2).await.unwrap().len(), 2);
        // Zero clamps up to one, oversized limits clamp down to the cap.
        assert_eq!(fetch_recent(&store, 0).await.unwrap().len(), 1);
        assert_eq!(fetch_recent(&store, 10_000).await.unwrap().len(), 5);
    }
}
