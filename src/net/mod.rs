pub mod client;

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

pub use client::HttpClient;

/// Plain GET access to the catalog site.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> AppResult<String>;

    async fn fetch_bytes(&self, url: &str) -> AppResult<Bytes>;
}

/// Resolves `href` against the page it was found on.
pub fn resolve_href(page_url: &str, href: &str) -> AppResult<String> {
    let base = Url::parse(page_url).map_err(|e| AppError::bad_url(page_url, e.to_string()))?;
    base.join(href.trim())
        .map(String::from)
        .map_err(|e| AppError::bad_url(href, e.to_string()))
}
