pub mod article;
pub mod error;
pub mod identity;
pub mod item;
pub mod store;

pub use article::{
    compare_recency, Article, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_LINK, PLACEHOLDER_TITLE,
    PUB_DATE_UNKNOWN,
};
pub use error::{Error, Result};
pub use identity::IdentityStrategy;
pub use item::{AttrValue, StoreItem};
pub use store::{CatalogStore, ScanPage, ScanToken};

pub mod prelude {
    pub use super::{Article, CatalogStore, Error, IdentityStrategy, Result, StoreItem};
}
