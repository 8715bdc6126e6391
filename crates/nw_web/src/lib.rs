use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod retrieve;
pub mod state;

pub use retrieve::{fetch_recent, DEFAULT_LIMIT, MAX_LIMIT};
pub use state::AppState;

use nw_core::Result;

/// Build the HTTP API router.
///
/// Every response goes out with permissive CORS headers so browser clients
/// can call the API from any origin.
pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/news", get(handlers::get_news))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve the API until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, fetch_recent, serve, AppState};
    pub use nw_core::{Article, Error, Result};
}
