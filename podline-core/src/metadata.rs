//! Open Graph extraction from episode pages.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{
    error::{CardError, Result},
    infra::Fetcher,
};

static OG_TITLE: Lazy<Selector> = Lazy::new(|| og_selector("og:title"));
static OG_IMAGE: Lazy<Selector> = Lazy::new(|| og_selector("og:image"));
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| og_selector("og:description"));

/// Show names are quoted with 《 》 in episode descriptions.
static CHANNEL_TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"《([^》]+)》").expect("channel title regex should compile")
});

fn og_selector(property: &str) -> Selector {
    Selector::parse(&format!(r#"meta[property="{property}"]"#))
        .expect("open graph selector should parse")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub channel_title: String,
}

/// Pull title, cover and description out of a page's Open Graph tags.
///
/// `og:title` and `og:image` are required; an empty `content` counts as
/// missing. A relative cover URL is resolved against `page_url`.
pub fn parse_page_metadata(html: &str, page_url: &Url) -> Result<PageMetadata> {
    let document = Html::parse_document(html);

    let title = og_content(&document, &OG_TITLE)
        .ok_or(CardError::MetadataMissing("og:title"))?;
    let image = og_content(&document, &OG_IMAGE)
        .ok_or(CardError::MetadataMissing("og:image"))?;
    let description =
        og_content(&document, &OG_DESCRIPTION).unwrap_or_default();

    let channel_title = extract_channel_title(&description);

    Ok(PageMetadata {
        title,
        image_url: resolve_image_url(page_url, &image),
        description,
        channel_title,
    })
}

/// First 《…》 quoted run in `description`, or an empty string.
pub fn extract_channel_title(description: &str) -> String {
    CHANNEL_TITLE_PATTERN
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn og_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

fn resolve_image_url(page_url: &Url, raw: &str) -> String {
    match Url::parse(raw) {
        Ok(_) => raw.to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => page_url
            .join(raw)
            .map(String::from)
            .unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Fetches a page once and parses its metadata.
#[derive(Clone)]
pub struct MetadataExtractor {
    fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for MetadataExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataExtractor").finish_non_exhaustive()
    }
}

impl MetadataExtractor {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn extract(&self, page_url: &Url) -> Result<PageMetadata> {
        let body = self.fetcher.fetch_page(page_url).await?;
        let html = String::from_utf8_lossy(&body);

        let metadata = parse_page_metadata(&html, page_url)?;
        debug!(
            description = %metadata.description,
            channel_title = %metadata.channel_title,
            "extracted page metadata"
        );

        Ok(metadata)
    }
}
