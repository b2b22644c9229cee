use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::ImageFetcher;

pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("prensa/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64> {
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        tokio::fs::write(dest, &body).await?;

        Ok(body.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_failure_is_an_error_value_not_a_panic() {
        let fetcher = HttpImageFetcher::new();
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("cover_Local_1.jpg");

        // Nothing listens on port 1; connection is refused immediately.
        let result = fetcher.fetch("http://127.0.0.1:1/cover.jpg", &dest).await;

        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
