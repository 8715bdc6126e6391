use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use nw_core::{Article, CatalogStore, Error, Result, ScanPage, ScanToken, StoreItem};
use nw_storage::MemoryStore;
use nw_web::{create_app, AppState};

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

async fn app_with(articles: &[Article]) -> Router {
    let store = Arc::new(MemoryStore::new());
    for a in articles {
        store.put(&a.id, a.to_item()).await.unwrap();
    }
    create_app(AppState::new(store)).await
}

async fn send(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn news_endpoint_returns_sorted_articles() {
    let app = app_with(&[
        article("c", "2024-08-19T10:00:00Z"),
        article("b", "2024-08-20T10:00:00Z"),
        article("na", "N/A"),
    ])
    .await;

    let response = send(app, "/api/news").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("CORS header missing")
            .to_str()
            .unwrap(),
        "*"
    );

    let body = json_body(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["articleId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["b", "c", "na"]);
}

#[tokio::test]
async fn articles_use_wire_field_names() {
    let app = app_with(&[article("one", "2024-08-20T10:00:00Z")]).await;

    let body = json_body(send(app, "/api/news").await).await;
    let first = &body.as_array().unwrap()[0];
    assert!(first.get("articleId").is_some());
    assert!(first.get("pubDate").is_some());
    assert!(first.get("id").is_none());
    assert!(first.get("pub_date").is_none());
}

#[tokio::test]
async fn limit_query_is_respected() {
    let seeded: Vec<Article> = (0..5)
        .map(|i| article(&format!("id{}", i), "2024-08-20T10:00:00Z"))
        .collect();
    let app = app_with(&seeded).await;

    let body = json_body(send(app, "/api/news?limit=2").await).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

struct FailingStore;

#[async_trait]
impl CatalogStore for FailingStore {
    async fn put(&self, _key: &str, _item: StoreItem) -> Result<()> {
        Ok(())
    }

    async fn scan(&self, _limit: usize, _start_token: Option<ScanToken>) -> Result<ScanPage> {
        Err(Error::StoreRead("connection reset".to_string()))
    }
}

#[tokio::test]
async fn store_failure_maps_to_500_with_stable_shape() {
    let app = create_app(AppState::new(Arc::new(FailingStore))).await;

    let response = send(app, "/api/news").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // CORS headers survive the error path.
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap()
            .to_str()
            .unwrap(),
        "*"
    );

    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to retrieve news articles");
    assert_eq!(body["code"], "RETRIEVAL_FAILED");
    assert!(body["details"].as_str().unwrap().contains("connection reset"));
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = app_with(&[]).await;

    let response = send(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}
