use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::retrieve::{fetch_recent, DEFAULT_LIMIT};
use crate::AppState;

/// Stable machine-readable code carried by retrieval failures.
pub const RETRIEVAL_FAILED: &str = "RETRIEVAL_FAILED";

const RETRIEVAL_ERROR_MESSAGE: &str = "Failed to retrieve news articles";

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub details: String,
    pub code: &'static str,
}

/// GET /api/news: recent articles as a JSON array, most recent first.
///
/// Store trouble never surfaces as a hung or dropped connection; it maps to
/// a 500 with a fixed error shape.
pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NewsQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    match fetch_recent(state.store.as_ref(), limit).await {
        Ok(articles) => (StatusCode::OK, Json(articles)).into_response(),
        Err(e) => {
            tracing::error!("failed to retrieve news articles: {}", e);
            let body = ErrorBody {
                error: RETRIEVAL_ERROR_MESSAGE,
                details: e.to_string(),
                code: RETRIEVAL_FAILED,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// GET /health: liveness check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
