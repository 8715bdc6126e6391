use std::sync::Arc;

use nw_core::{CatalogStore, Error, Result};

pub mod backends;

pub use backends::memory::MemoryStore;

/// Instantiate a catalog store backend by name.
///
/// `memory` is the reference backend; the production store is an external
/// collaborator reached through the same [`CatalogStore`] contract.
pub async fn create_store(backend: &str) -> Result<Arc<dyn CatalogStore>> {
    tracing::debug!("creating {} catalog store", backend);
    match backend {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(Error::Config(format!("unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::memory::MemoryStore;
    pub use super::create_store;
}
