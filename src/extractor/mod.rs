//! Per-article field extraction.
//!
//! Every field is a bounded wait that degrades on absence: a missing
//! heading becomes the `"Unknown"` sentinel, a missing excerpt stays empty,
//! a missing image stays unset. Driver errors are absorbed and logged here;
//! nothing escapes this component and the article loop always moves on.

use tracing::warn;

use crate::domain::ArticleRecord;
use crate::driver::Driver;
use crate::session::{ExcerptMode, ScrapeConfig};

pub struct ArticleExtractor {
    config: ScrapeConfig,
}

impl ArticleExtractor {
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    /// Extract heading, excerpt, and cover-image URL from the page the
    /// driver is currently on.
    pub async fn extract(&self, driver: &dyn Driver, url: &str) -> ArticleRecord {
        let mut record = ArticleRecord::new(url.to_string());

        if let Some(heading) = self.heading(driver).await {
            record.heading = heading;
        }
        if let Some(excerpt) = self.excerpt(driver).await {
            record.excerpt = excerpt;
        }
        record.image_url = self.image_url(driver).await;

        record
    }

    async fn heading(&self, driver: &dyn Driver) -> Option<String> {
        driver
            .wait_for_text(&self.config.heading_selector, self.config.field_timeout())
            .await
            .unwrap_or_else(|e| {
                warn!("Heading extraction failed: {}", e);
                None
            })
    }

    async fn excerpt(&self, driver: &dyn Driver) -> Option<String> {
        match self.config.excerpt_mode {
            ExcerptMode::Summary => driver
                .wait_for_text(&self.config.excerpt_selector, self.config.field_timeout())
                .await
                .unwrap_or_else(|e| {
                    warn!("Excerpt extraction failed: {}", e);
                    None
                }),
            ExcerptMode::LeadParagraphs => {
                let paragraphs = driver
                    .texts(&self.config.paragraph_selector)
                    .await
                    .unwrap_or_else(|e| {
                        warn!("Excerpt extraction failed: {}", e);
                        Vec::new()
                    });

                let lead: Vec<String> = paragraphs
                    .into_iter()
                    .filter(|p| !p.trim().is_empty())
                    .take(self.config.excerpt_paragraphs)
                    .collect();

                (!lead.is_empty()).then(|| lead.join(" "))
            }
        }
    }

    async fn image_url(&self, driver: &dyn Driver) -> Option<String> {
        driver
            .wait_for_attr(
                &self.config.image_selector,
                "src",
                self.config.field_timeout(),
            )
            .await
            .unwrap_or_else(|e| {
                warn!("Image extraction failed: {}", e);
                None
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_HEADING;
    use crate::driver::testing::StubDriver;

    fn config() -> ScrapeConfig {
        ScrapeConfig::default()
    }

    #[tokio::test]
    async fn test_extracts_all_fields() {
        let mut driver = StubDriver::default();
        driver
            .texts
            .insert("h1".into(), "La ola que no cesa".into());
        driver.texts.insert("p.a_st".into(), "Un resumen.".into());
        driver.attrs.insert(
            ("article img, figure img".into(), "src".into()),
            "https://example.com/cover.jpg".into(),
        );

        let extractor = ArticleExtractor::new(config());
        let record = extractor.extract(&driver, "https://example.com/a1").await;

        assert_eq!(record.heading, "La ola que no cesa");
        assert_eq!(record.excerpt, "Un resumen.");
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://example.com/cover.jpg")
        );
    }

    #[tokio::test]
    async fn test_missing_fields_degrade_without_error() {
        let driver = StubDriver::default();
        let extractor = ArticleExtractor::new(config());
        let record = extractor.extract(&driver, "https://example.com/a1").await;

        assert_eq!(record.heading, UNKNOWN_HEADING);
        assert!(record.excerpt.is_empty());
        assert!(record.image_url.is_none());
    }

    #[tokio::test]
    async fn test_lead_paragraphs_mode_takes_first_three() {
        let mut scrape = config();
        scrape.excerpt_mode = ExcerptMode::LeadParagraphs;

        let mut driver = StubDriver::default();
        driver.text_lists.insert(
            "article p".into(),
            vec![
                "Uno.".into(),
                "Dos.".into(),
                "Tres.".into(),
                "Cuatro.".into(),
            ],
        );

        let extractor = ArticleExtractor::new(scrape);
        let record = extractor.extract(&driver, "https://example.com/a1").await;
        assert_eq!(record.excerpt, "Uno. Dos. Tres.");
    }

    #[tokio::test]
    async fn test_lead_paragraphs_mode_skips_blank_paragraphs() {
        let mut scrape = config();
        scrape.excerpt_mode = ExcerptMode::LeadParagraphs;
        scrape.excerpt_paragraphs = 2;

        let mut driver = StubDriver::default();
        driver.text_lists.insert(
            "article p".into(),
            vec!["  ".into(), "Uno.".into(), "Dos.".into()],
        );

        let extractor = ArticleExtractor::new(scrape);
        let record = extractor.extract(&driver, "https://example.com/a1").await;
        assert_eq!(record.excerpt, "Uno. Dos.");
    }
}
