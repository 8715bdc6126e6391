use std::path::Path;

use serde::{Deserialize, Serialize};

use nw_core::{Error, Result};

/// A named feed endpoint. `name` is the human-readable source label stamped
/// onto every article it yields; `url` locates the syndication document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Built-in source list used when no sources file is given.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "BBC News - Technology",
            "http://feeds.bbci.co.uk/news/technology/rss.xml",
        ),
        FeedSource::new("CNN Top Stories", "http://rss.cnn.com/rss/cnn_topstories.rss"),
        FeedSource::new("The Verge - Tech", "https://www.theverge.com/rss/index.xml"),
    ]
}

/// Load a source list from a JSON file shaped
/// `[{"name": "...", "url": "..."}]`. Order in the file is the order
/// sources are processed in.
pub fn load_sources(path: &Path) -> Result<Vec<FeedSource>> {
    let raw = std::fs::read_to_string(path)?;
    let sources: Vec<FeedSource> = serde_json::from_str(&raw)?;
    if sources.is_empty() {
        return Err(Error::Config(format!(
            "no sources defined in {}",
            path.display()
        )));
    }
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_sources_are_named_and_ordered() {
        let sources = default_sources();
        assert_eq!(sources.len(), 3);
        assert_eq!(sources[0].name, "BBC News - Technology");
        assert!(sources.iter().all(|s| s.url.starts_with("http")));
    }

    #[test]
    fn loads_sources_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Example Wire", "url": "https://example.com/rss.xml"}}]"#
        )
        .unwrap();

        let sources = load_sources(file.path()).unwrap();
        assert_eq!(
            sources,
            vec![FeedSource::new("Example Wire", "https://example.com/rss.xml")]
        );
    }

    #[test]
    fn empty_source_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        assert!(matches!(
            load_sources(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_sources(file.path()),
            Err(Error::Serialization(_))
        ));
    }
}
