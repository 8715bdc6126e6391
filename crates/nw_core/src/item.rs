use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::article::{
    Article, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_LINK, PLACEHOLDER_TITLE, PUB_DATE_UNKNOWN,
};
use crate::error::{Error, Result};

/// A scalar wrapped in its store type descriptor, serialized externally
/// tagged: `{"S": "..."}`, `{"N": "..."}`, `{"BOOL": true}`. This is the raw
/// representation the catalog store persists; readers must unwrap it back to
/// the scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
}

impl AttrValue {
    pub fn s(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// The inner string when this is a string attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            _ => None,
        }
    }

    /// Unwraps the descriptor to its scalar regardless of type, the way the
    /// read path flattens stored items for the API response.
    pub fn to_scalar(&self) -> String {
        match self {
            Self::S(value) | Self::N(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
        }
    }
}

/// One stored record: attribute name to wrapped scalar.
pub type StoreItem = HashMap<String, AttrValue>;

fn attr_or(item: &StoreItem, name: &str, default: &str) -> String {
    item.get(name)
        .map(AttrValue::to_scalar)
        .unwrap_or_else(|| default.to_string())
}

impl Article {
    /// Wraps all six fields into the store's wire representation, keyed the
    /// way the API exposes them (`articleId`, `pubDate`).
    pub fn to_item(&self) -> StoreItem {
        let mut item = StoreItem::new();
        item.insert("articleId".to_string(), AttrValue::s(&self.id));
        item.insert("title".to_string(), AttrValue::s(&self.title));
        item.insert("link".to_string(), AttrValue::s(&self.link));
        item.insert("source".to_string(), AttrValue::s(&self.source));
        item.insert("pubDate".to_string(), AttrValue::s(&self.pub_date));
        item.insert("description".to_string(), AttrValue::s(&self.description));
        item
    }

    /// Reconstructs an article from a raw stored item, applying the same
    /// defaulting rules as ingestion to any attribute the item lacks. An
    /// item without a usable `articleId` cannot be addressed at all and is
    /// rejected as malformed.
    pub fn from_item(item: &StoreItem) -> Result<Self> {
        let id = item
            .get("articleId")
            .and_then(AttrValue::as_s)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MalformedRecord("item has no articleId attribute".to_string()))?
            .to_string();

        Ok(Self {
            id,
            title: attr_or(item, "title", PLACEHOLDER_TITLE),
            link: attr_or(item, "link", PLACEHOLDER_LINK),
            source: attr_or(item, "source", ""),
            pub_date: attr_or(item, "pubDate", PUB_DATE_UNKNOWN),
            description: attr_or(item, "description", PLACEHOLDER_DESCRIPTION),
        })
    }
}
