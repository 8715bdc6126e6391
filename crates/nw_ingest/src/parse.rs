use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use nw_core::{Error, Result};

/// A single entry lifted out of a syndication document, before
/// normalization. Fields hold raw element text; absent elements stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
}

/// Parse a feed document from raw XML bytes.
///
/// Handles RSS 2.0 `<item>` and Atom `<entry>` elements in the same pass, so
/// callers never need to know which dialect a source speaks. Elements outside
/// an entry (channel titles and the like) are ignored, and only an entry's
/// direct children feed its fields: nested blocks such as an Atom `<source>`
/// carry metadata about another feed, not about this entry.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<FeedEntry> = None;
    let mut current_element = String::new();
    // How many elements are open inside the current entry. 0 means the
    // parser sits directly on the entry, so the next Start is a direct
    // child; anything deeper belongs to a nested block and is skipped.
    let mut entry_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if name == "item" || name == "entry" {
                    current = Some(FeedEntry::default());
                    current_element.clear();
                    entry_depth = 0;
                } else if let Some(ref mut entry) = current {
                    if entry_depth == 0 {
                        if name == "link" {
                            apply_link_attributes(&e, entry);
                        }
                        current_element = name;
                    }
                    entry_depth += 1;
                } else {
                    current_element = name;
                }
            }
            Ok(Event::Empty(e)) => {
                // Atom links are usually self-closing: <link rel=".." href=".."/>
                if e.name().as_ref() == b"link" && entry_depth == 0 {
                    if let Some(ref mut entry) = current {
                        apply_link_attributes(&e, entry);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                if name == "item" || name == "entry" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    entry_depth = 0;
                    current_element.clear();
                } else if current.is_some() {
                    entry_depth = entry_depth.saturating_sub(1);
                    if entry_depth == 0 {
                        current_element.clear();
                    }
                } else {
                    current_element.clear();
                }
            }
            Ok(Event::Text(e)) => {
                if entry_depth == 1 {
                    if let Some(ref mut entry) = current {
                        let text = e.unescape().unwrap_or_default().to_string();
                        if !text.is_empty() {
                            assign_text(entry, &current_element, &text);
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if entry_depth == 1 {
                    if let Some(ref mut entry) = current {
                        let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                        if !text.is_empty() {
                            assign_text(entry, &current_element, &text);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::FeedParse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn assign_text(entry: &mut FeedEntry, element: &str, text: &str) {
    match element {
        "title" => append(&mut entry.title, text),
        // First wins: some feeds repeat the link element.
        "link" => {
            if entry.link.is_none() {
                entry.link = Some(text.to_string());
            }
        }
        "summary" => append(&mut entry.summary, text),
        "description" => append(&mut entry.description, text),
        // An item may carry both pubDate and dc:date; the first one wins.
        "pubDate" | "published" | "dc:date" => {
            if entry.published.is_none() {
                entry.published = Some(text.to_string());
            }
        }
        "updated" => {
            if entry.updated.is_none() {
                entry.updated = Some(text.to_string());
            }
        }
        _ => {}
    }
}

// Text content may arrive as several events when CDATA and plain text mix
// inside one element.
fn append(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => existing.push_str(text),
        None => *slot = Some(text.to_string()),
    }
}

fn apply_link_attributes(tag: &BytesStart, entry: &mut FeedEntry) {
    if entry.link.is_some() {
        return;
    }

    let mut href = None;
    let mut rel = None;
    for attr in tag.attributes().flatten() {
        let value = attr.unescape_value().unwrap_or_default().to_string();
        match attr.key.as_ref() {
            b"href" => href = Some(value),
            b"rel" => rel = Some(value),
            _ => {}
        }
    }

    // rel="self", rel="enclosure" and friends point away from the article.
    let alternate = rel.as_deref().map_or(true, |r| r == "alternate");
    if alternate {
        if let Some(href) = href {
            entry.link = Some(href);
        }
    }
}
