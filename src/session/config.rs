use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the body excerpt is pulled out of an article page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcerptMode {
    /// One designated summary paragraph (`excerpt_selector`)
    Summary,
    /// First `excerpt_paragraphs` non-empty paragraphs concatenated
    LeadParagraphs,
}

/// Configuration for one scraping session: where to go, what to select,
/// and how long to wait for each piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Listing page the session starts from
    pub listing_url: String,

    /// Maximum number of articles per session (default: 5)
    pub article_limit: usize,

    /// Cookie-consent button; absence is not an error
    pub cookie_selector: String,

    /// Article links on the listing page
    pub link_selector: String,

    /// Article heading element
    pub heading_selector: String,

    /// Excerpt extraction strategy (default: summary)
    pub excerpt_mode: ExcerptMode,

    /// Summary paragraph selector, used in `summary` mode
    pub excerpt_selector: String,

    /// Body paragraph selector, used in `lead-paragraphs` mode
    pub paragraph_selector: String,

    /// Paragraph count for `lead-paragraphs` mode (default: 3)
    pub excerpt_paragraphs: usize,

    /// Cover image element
    pub image_selector: String,

    /// Directory cover images are saved under
    pub images_dir: PathBuf,

    /// Bounded wait for the cookie dialog in seconds (default: 5)
    pub cookie_timeout_secs: u64,

    /// Bounded wait for article links on the listing page (default: 10)
    pub discovery_timeout_secs: u64,

    /// Bounded wait for each per-article field (default: 10)
    pub field_timeout_secs: u64,

    /// Run the local browser headless (default: true)
    pub headless: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://elpais.com/opinion/".to_string(),
            article_limit: 5,
            cookie_selector: "#didomi-notice-agree-button".to_string(),
            link_selector: "article header h2 a".to_string(),
            heading_selector: "h1".to_string(),
            excerpt_mode: ExcerptMode::Summary,
            excerpt_selector: "p.a_st".to_string(),
            paragraph_selector: "article p".to_string(),
            excerpt_paragraphs: 3,
            image_selector: "article img, figure img".to_string(),
            images_dir: PathBuf::from("article_images"),
            cookie_timeout_secs: 5,
            discovery_timeout_secs: 10,
            field_timeout_secs: 10,
            headless: true,
        }
    }
}

impl ScrapeConfig {
    pub fn cookie_timeout(&self) -> Duration {
        Duration::from_secs(self.cookie_timeout_secs)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }

    pub fn field_timeout(&self) -> Duration {
        Duration::from_secs(self.field_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ScrapeConfig::default();
        assert_eq!(config.article_limit, 5);
        assert_eq!(config.excerpt_mode, ExcerptMode::Summary);
        assert_eq!(config.excerpt_paragraphs, 3);
        assert_eq!(config.cookie_timeout_secs, 5);
        assert_eq!(config.discovery_timeout_secs, 10);
        assert_eq!(config.field_timeout_secs, 10);
        assert!(config.headless);
        assert!(config.listing_url.starts_with("https://"));
    }

    #[test]
    fn test_timeout_durations() {
        let config = ScrapeConfig::default();
        assert_eq!(config.cookie_timeout(), Duration::from_secs(5));
        assert_eq!(config.discovery_timeout(), Duration::from_secs(10));
        assert_eq!(config.field_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_excerpt_mode_kebab_case() {
        #[derive(serde::Deserialize)]
        struct Wrap {
            mode: ExcerptMode,
        }

        let wrap: Wrap = toml::from_str("mode = \"lead-paragraphs\"").unwrap();
        assert_eq!(wrap.mode, ExcerptMode::LeadParagraphs);

        let wrap: Wrap = toml::from_str("mode = \"summary\"").unwrap();
        assert_eq!(wrap.mode, ExcerptMode::Summary);
    }
}
