//! End-to-end session orchestration.
//!
//! One [`SessionRunner::run`] call is one session:
//!
//! ```text
//! Start → CookieConsent → LinkDiscovery → PerArticleLoop
//!       → Translation → Analysis → Report → Closed
//! ```
//!
//! Only two conditions are fatal: the listing page being unreachable and
//! zero discovered article links. Everything after that degrades: missing
//! fields become sentinels, a failed translation becomes an empty set, and
//! a failed image download is logged and forgotten. The browser session is
//! released exactly once on every exit path, fatal aborts included.

mod config;
mod report;

pub use config::{ExcerptMode, ScrapeConfig};

use std::sync::Arc;

use tracing::{info, warn};

use crate::analyzer::{self, AnalyzerConfig};
use crate::app::{PrensaError, Result};
use crate::domain::{ArticleRecord, SessionResult, SessionStatus, TranslatedTitle};
use crate::driver::Driver;
use crate::extractor::ArticleExtractor;
use crate::fetcher::{self, ImageFetcher};
use crate::translator::Translator;

pub struct SessionRunner {
    config: ScrapeConfig,
    analyzer: AnalyzerConfig,
    extractor: ArticleExtractor,
    translator: Arc<dyn Translator>,
    images: Arc<dyn ImageFetcher>,
}

impl SessionRunner {
    pub fn new(
        config: ScrapeConfig,
        analyzer: AnalyzerConfig,
        translator: Arc<dyn Translator>,
        images: Arc<dyn ImageFetcher>,
    ) -> Self {
        let extractor = ArticleExtractor::new(config.clone());
        Self {
            config,
            analyzer,
            extractor,
            translator,
            images,
        }
    }

    /// Run one full session on `driver`, consuming it. The driver is
    /// released before this returns, whatever happened in between.
    pub async fn run(&self, driver: Box<dyn Driver>, label: &str) -> SessionResult {
        info!("[{label}] Starting session");
        let mut result = SessionResult::started(label);

        match self.run_pipeline(driver.as_ref(), label, &mut result).await {
            Ok(()) => {
                result.status = SessionStatus::Passed;
                result.reason = Some("Scraped and analyzed successfully".to_string());
            }
            Err(e) => {
                result.status = SessionStatus::Failed;
                result.reason = Some(e.to_string());
                warn!("[{label}] Session failed: {e}");
            }
        }

        let reason = result.reason.clone().unwrap_or_default();
        if let Err(e) = driver.set_status(result.status, &reason).await {
            warn!("[{label}] Status report failed: {e}");
        }
        if let Err(e) = driver.close().await {
            warn!("[{label}] Browser release failed: {e}");
        }

        info!("[{label}] Session finished: {}", result.status.as_str());
        result
    }

    async fn run_pipeline(
        &self,
        driver: &dyn Driver,
        label: &str,
        result: &mut SessionResult,
    ) -> Result<()> {
        // Start
        driver
            .navigate(&self.config.listing_url)
            .await
            .map_err(|e| PrensaError::Session(format!("listing page unreachable: {e}")))?;

        // CookieConsent
        match driver
            .click(&self.config.cookie_selector, self.config.cookie_timeout())
            .await
        {
            Ok(true) => info!("[{label}] Accepted cookies"),
            Ok(false) => {}
            Err(e) => warn!("[{label}] Cookie consent dismissal failed: {e}"),
        }

        // LinkDiscovery
        let mut links = driver
            .wait_for_attrs(
                &self.config.link_selector,
                "href",
                self.config.discovery_timeout(),
            )
            .await
            .unwrap_or_else(|e| {
                warn!("[{label}] Link discovery failed: {e}");
                Vec::new()
            });
        links.truncate(self.config.article_limit);

        if links.is_empty() {
            return Err(PrensaError::Session(
                "no article links found; the listing selectors may have changed".to_string(),
            ));
        }
        info!("[{label}] Found {} article links", links.len());

        // PerArticleLoop
        if let Err(e) = tokio::fs::create_dir_all(&self.config.images_dir).await {
            warn!(
                "[{label}] Could not create {}: {e}",
                self.config.images_dir.display()
            );
        }

        for (index, url) in links.iter().enumerate() {
            let ordinal = index + 1;
            info!("[{label}] Article {ordinal}: {url}");

            if let Err(e) = driver.navigate(url).await {
                warn!("[{label}] Article {ordinal} unreachable: {e}");
                result.records.push(ArticleRecord::new(url.clone()));
                continue;
            }

            let record = self.extractor.extract(driver, url).await;

            if let Some(ref image_url) = record.image_url {
                let dest = fetcher::image_path(&self.config.images_dir, label, ordinal);
                match self.images.fetch(image_url, &dest).await {
                    Ok(bytes) => {
                        info!("[{label}] Saved cover image to {} ({bytes} bytes)", dest.display())
                    }
                    Err(e) => warn!("[{label}] Image download failed: {e}"),
                }
            }

            result.records.push(record);
        }

        // Translation
        let headings: Vec<String> = result.records.iter().map(|r| r.heading.clone()).collect();
        let translated = match self.translator.translate_batch(&headings).await {
            Ok(translated) => translated,
            Err(e) => {
                warn!("[{label}] Translation failed: {e}");
                Vec::new()
            }
        };
        result.titles = headings
            .into_iter()
            .zip(translated)
            .map(|(original, translated)| TranslatedTitle {
                original,
                translated,
            })
            .collect();

        // Analysis
        let translated_texts: Vec<String> =
            result.titles.iter().map(|t| t.translated.clone()).collect();
        result.repeated_words = analyzer::repeated_words(&translated_texts, &self.analyzer);

        // Report
        report::print_session(result, self.analyzer.threshold);

        Ok(())
    }
}
