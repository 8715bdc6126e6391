use std::sync::Arc;

use nw_core::CatalogStore;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}
