//! Headline translation.
//!
//! The gateway contract: same length, same order as the input. A failed
//! batch is the caller's cue to degrade to an empty translated set; the
//! analyzer then reports no repetitions instead of failing the session.

pub mod google;

pub use google::GoogleTranslator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::app::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Source language code (default: "es")
    pub source: String,

    /// Target language code (default: "en")
    pub target: String,

    /// Translation endpoint
    pub endpoint: String,

    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source: "es".to_string(),
            target: "en".to_string(),
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout_secs: 10,
        }
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `texts` in order; the result has the same length and order.
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = TranslationConfig::default();
        assert_eq!(config.source, "es");
        assert_eq!(config.target, "en");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.endpoint.starts_with("https://"));
    }
}
