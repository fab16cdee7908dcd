//! Downloads the selected stock model photo.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, AppResult};

/// Raw image bytes plus the content type reported by the server, if any.
#[derive(Clone, Debug)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Source of stock model images. Swapped for a stub in tests.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> AppResult<FetchedImage>;
}

#[derive(Clone)]
pub struct HttpImageSource {
    client: Client,
    timeout: Duration,
}

impl HttpImageSource {
    pub fn new(timeout: Duration) -> Self {
        HttpImageSource { client: Client::new(), timeout }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    /// GET the image with a fixed wall-clock bound.
    async fn fetch(&self, url: &str) -> AppResult<FetchedImage> {
        tracing::info!("Fetching stock model image from {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamFetch(format!("{} returned {}", url, status)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamFetch(e.to_string()))?
            .to_vec();
        if bytes.is_empty() {
            return Err(AppError::UpstreamFetch(format!("{} returned an empty body", url)));
        }
        tracing::debug!("Fetched {} bytes ({:?})", bytes.len(), content_type);
        Ok(FetchedImage { bytes, content_type })
    }
}
