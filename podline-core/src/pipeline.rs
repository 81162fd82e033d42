//! Link in, share card out.
//!
//! Metadata failures abort the request. Cover sampling failures never do:
//! the card falls back to the default gradient so callers always get
//! something renderable.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    color::Rgb,
    error::{CardError, FetchError, Result},
    gradient::{GradientDescriptor, compose},
    infra::{FetchConfig, Fetcher, HttpFetcher},
    metadata::MetadataExtractor,
    sampler::{ImageSampler, SamplerOptions},
};

/// Everything a share card needs, ready to serialize for the web client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "backgroundColor")]
    pub background_color: GradientDescriptor,
    pub channel_title: String,
}

/// Validate a caller-supplied link before any network traffic.
pub fn parse_link(link: &str) -> Result<Url> {
    let link = link.trim();
    if link.is_empty() {
        return Err(CardError::MissingLink);
    }

    let url = Url::parse(link).map_err(|err| CardError::InvalidLink {
        link: link.to_string(),
        reason: err.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CardError::InvalidLink {
            link: link.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct CardGenerator {
    extractor: MetadataExtractor,
    sampler: ImageSampler,
}

impl CardGenerator {
    pub fn new(fetcher: Arc<dyn Fetcher>, options: SamplerOptions) -> Self {
        Self {
            extractor: MetadataExtractor::new(Arc::clone(&fetcher)),
            sampler: ImageSampler::new(fetcher, options),
        }
    }

    pub fn from_config(
        config: FetchConfig,
        options: SamplerOptions,
    ) -> std::result::Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(Arc::new(fetcher), options))
    }

    pub async fn generate(&self, link: &str) -> Result<GenerationResult> {
        let page_url = parse_link(link)?;
        info!(link = %page_url, "generating share card");

        let metadata = self.extractor.extract(&page_url).await?;

        let colors = self.sample_cover(&metadata.image_url).await;
        let background_color = compose(&colors);
        debug!(gradient = %background_color, "generated gradient");

        Ok(GenerationResult {
            image_url: metadata.image_url,
            title: metadata.title,
            description: metadata.description,
            background_color,
            channel_title: metadata.channel_title,
        })
    }

    async fn sample_cover(&self, image_url: &str) -> Vec<Rgb> {
        let url = match Url::parse(image_url) {
            Ok(url) => url,
            Err(err) => {
                warn!(image_url, error = %err, "cover URL is not usable, using fallback gradient");
                return Vec::new();
            }
        };

        match self.sampler.sample_url(&url).await {
            Ok(colors) => colors,
            Err(err) => {
                warn!(image_url, error = %err, "cover sampling failed, using fallback gradient");
                Vec::new()
            }
        }
    }
}
