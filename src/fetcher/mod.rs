//! Cover image download.
//!
//! A failed download is reported to the caller as an error value and
//! absorbed there; it never ends a session.

pub mod image;

pub use image::HttpImageFetcher;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::app::Result;

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download `url` to `dest`, returning the number of bytes written.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Destination path for one article's cover image: the session label with
/// spaces flattened to underscores, plus the 1-based article index.
pub fn image_path(dir: &Path, label: &str, index: usize) -> PathBuf {
    dir.join(format!("cover_{}_{}.jpg", label.replace(' ', "_"), index))
}
