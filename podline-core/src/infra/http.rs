//! Outbound HTTP for page and cover fetches.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Some podcast hosts refuse requests that do not look like a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.82 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Applied to each request as a whole, connect through last body byte.
    pub timeout: Duration,
    pub user_agent: String,
    pub max_page_bytes: usize,
    pub max_image_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_page_bytes: DEFAULT_MAX_PAGE_BYTES,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

/// Single-attempt body downloads. No retries, no caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<Vec<u8>, FetchError>;

    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    async fn get_limited(
        &self,
        url: &Url,
        limit: usize,
    ) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| FetchError::from_reqwest(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let too_large = || FetchError::TooLarge {
            url: url.to_string(),
            limit,
        };

        if let Some(declared) = response.content_length()
            && declared > limit as u64
        {
            return Err(too_large());
        }

        // Read incrementally so an oversized body is dropped mid-stream.
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| FetchError::from_reqwest(url, err))?
        {
            if body.len() + chunk.len() > limit {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }

        debug!(url = %url, bytes = body.len(), "fetched body");
        Ok(body)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.get_limited(url, self.config.max_page_bytes).await
    }

    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.get_limited(url, self.config.max_image_bytes).await
    }
}
