use std::sync::Arc;

use crate::config::Config;
use crate::fetcher::{HttpImageFetcher, ImageFetcher};
use crate::session::SessionRunner;
use crate::translator::{GoogleTranslator, Translator};

/// Wires the configuration together with the shared collaborators. Built
/// once at startup; session runners are stamped out from it per command.
pub struct AppContext {
    pub config: Config,
    pub translator: Arc<dyn Translator>,
    pub images: Arc<dyn ImageFetcher>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let translator: Arc<dyn Translator> =
            Arc::new(GoogleTranslator::new(config.translation.clone()));
        let images: Arc<dyn ImageFetcher> = Arc::new(HttpImageFetcher::new());

        Self {
            config,
            translator,
            images,
        }
    }

    pub fn runner(&self) -> SessionRunner {
        SessionRunner::new(
            self.config.scrape.clone(),
            self.config.analyzer.clone(),
            self.translator.clone(),
            self.images.clone(),
        )
    }
}
