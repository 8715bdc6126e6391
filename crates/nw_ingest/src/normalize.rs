use chrono::{DateTime, Utc};

use nw_core::{
    Article, IdentityStrategy, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_LINK, PLACEHOLDER_TITLE,
    PUB_DATE_UNKNOWN,
};

use crate::parse::FeedEntry;

const PUB_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Turn a raw feed entry into a storable [`Article`].
///
/// Missing fields get placeholder text rather than failing the entry, and the
/// publication date is rewritten to UTC ISO-8601 when it parses. The entry's
/// link (not the placeholder) feeds the identity strategy, so linkless
/// entries always get a fresh identity.
pub fn normalize_entry(entry: &FeedEntry, source: &str, identity: IdentityStrategy) -> Article {
    let title = entry
        .title
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());
    let link = entry
        .link
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_LINK.to_string());
    let description = entry
        .summary
        .clone()
        .or_else(|| entry.description.clone())
        .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string());
    let pub_date = normalize_pub_date(entry.published.as_deref().or(entry.updated.as_deref()));

    Article {
        id: identity.assign(entry.link.as_deref()),
        title,
        link,
        source: source.to_string(),
        pub_date,
        description,
    }
}

/// RSS dates are RFC 2822, Atom dates are RFC 3339. Anything that parses is
/// rendered in UTC; anything that does not is kept verbatim so no information
/// is lost. Absent dates become the `N/A` sentinel.
fn normalize_pub_date(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match parse_date(raw) {
            Some(utc) => utc.format(PUB_DATE_FORMAT).to_string(),
            None => raw.to_string(),
        },
        None => PUB_DATE_UNKNOWN.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
