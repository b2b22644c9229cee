use serde::{Deserialize, Serialize};

/// Sentinel heading substituted when an article's heading cannot be extracted.
pub const UNKNOWN_HEADING: &str = "Unknown";

/// One scraped article. Immutable after creation; at most a handful exist
/// per session and none of them outlive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub heading: String,
    pub excerpt: String,
    pub image_url: Option<String>,
}

impl ArticleRecord {
    pub fn new(url: String) -> Self {
        Self {
            url,
            heading: UNKNOWN_HEADING.to_string(),
            excerpt: String::new(),
            image_url: None,
        }
    }

    /// Whether a real heading was extracted (as opposed to the sentinel).
    pub fn has_heading(&self) -> bool {
        self.heading != UNKNOWN_HEADING
    }

    pub fn has_excerpt(&self) -> bool {
        !self.excerpt.is_empty()
    }
}

/// A heading paired with its translation. Derived 1:1 from
/// [`ArticleRecord::heading`] in listing order; positions must line up with
/// the originals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedTitle {
    pub original: String,
    pub translated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_uses_sentinel_heading() {
        let record = ArticleRecord::new("https://example.com/a1".into());
        assert_eq!(record.heading, UNKNOWN_HEADING);
        assert!(!record.has_heading());
        assert!(!record.has_excerpt());
        assert!(record.image_url.is_none());
    }

    #[test]
    fn test_has_heading_after_extraction() {
        let mut record = ArticleRecord::new("https://example.com/a1".into());
        record.heading = "La vida es sueño".into();
        assert!(record.has_heading());
    }

    #[test]
    fn test_has_excerpt() {
        let mut record = ArticleRecord::new("https://example.com/a1".into());
        record.excerpt = "Primer párrafo.".into();
        assert!(record.has_excerpt());
    }
}
