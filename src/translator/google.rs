use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::app::{PrensaError, Result};
use crate::translator::{TranslationConfig, Translator};

/// Batch translator over Google's public `translate_a/single` endpoint.
///
/// The endpoint answers one text per request, so a batch is a sequence of
/// requests in input order.
pub struct GoogleTranslator {
    client: Client,
    config: TranslationConfig,
}

impl GoogleTranslator {
    pub fn new(config: TranslationConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .user_agent(concat!("prensa/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    async fn translate_one(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", self.config.source.as_str()),
                ("tl", self.config.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        response.error_for_status_ref()?;
        let value: Value = response.json().await?;

        parse_translation(&value).ok_or_else(|| {
            PrensaError::Translation(format!("Unexpected response shape for {:?}", text))
        })
    }
}

/// The endpoint returns nested arrays; the translation is the concatenation
/// of the first string of every segment under index 0.
fn parse_translation(value: &Value) -> Option<String> {
    let segments = value.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(Value::as_str) {
            out.push_str(part);
        }
    }
    (!out.is_empty()).then_some(out)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        let mut translated = Vec::with_capacity(texts.len());
        for text in texts {
            if text.trim().is_empty() {
                translated.push(String::new());
                continue;
            }
            translated.push(self.translate_one(text).await?);
        }
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_single_segment() {
        let value = json!([[["The cat", "El gato", null, null, 10]], null, "es"]);
        assert_eq!(parse_translation(&value).as_deref(), Some("The cat"));
    }

    #[test]
    fn test_parse_translation_concatenates_segments() {
        let value = json!([
            [
                ["The wave ", "La ola ", null],
                ["that never stops", "que no cesa", null]
            ],
            null,
            "es"
        ]);
        assert_eq!(
            parse_translation(&value).as_deref(),
            Some("The wave that never stops")
        );
    }

    #[test]
    fn test_parse_translation_rejects_unexpected_shape() {
        assert_eq!(parse_translation(&json!({"error": 400})), None);
        assert_eq!(parse_translation(&json!([])), None);
        assert_eq!(parse_translation(&json!([[]])), None);
    }

    #[tokio::test]
    async fn test_empty_batch_makes_no_requests() {
        let translator = GoogleTranslator::new(TranslationConfig::default());
        let out = translator.translate_batch(&[]).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_blank_entries_pass_through_without_requests() {
        let translator = GoogleTranslator::new(TranslationConfig::default());
        let out = translator
            .translate_batch(&["".to_string(), "  ".to_string()])
            .await
            .unwrap();
        assert_eq!(out, vec!["".to_string(), "".to_string()]);
    }
}
