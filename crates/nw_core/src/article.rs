use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Substituted when a feed entry carries no title.
pub const PLACEHOLDER_TITLE: &str = "No Title";
/// Substituted when a feed entry carries no link.
pub const PLACEHOLDER_LINK: &str = "No Link";
/// Substituted when a feed entry carries neither a summary nor a description.
pub const PLACEHOLDER_DESCRIPTION: &str = "No Description";
/// Sentinel publication date for entries with no date at all. Sorts after
/// every real date under [`compare_recency`].
pub const PUB_DATE_UNKNOWN: &str = "N/A";

/// One normalized news article. Every field is always populated: ingestion
/// substitutes placeholders for whatever the source left out, so nothing
/// downstream deals in absent values.
///
/// `id` is assigned once at ingestion time and exposed as `articleId` on the
/// wire and over the API; `pub_date` is an ISO-8601 UTC string when the
/// source date was parseable, the raw source string when it was not, and
/// [`PUB_DATE_UNKNOWN`] when the entry had no date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "articleId")]
    pub id: String,
    pub title: String,
    pub link: String,
    pub source: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub description: String,
}

/// Orders articles most-recent-first by their `pub_date` strings.
///
/// ISO-8601 timestamps compare correctly byte-wise, so real dates use plain
/// descending string comparison. The [`PUB_DATE_UNKNOWN`] sentinel always
/// orders after every real date ("unknown dates last"); a naive reversed
/// byte comparison would put it first, because letters sort above digits.
pub fn compare_recency(a: &Article, b: &Article) -> Ordering {
    match (
        a.pub_date == PUB_DATE_UNKNOWN,
        b.pub_date == PUB_DATE_UNKNOWN,
    ) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.pub_date.cmp(&a.pub_date),
    }
}
