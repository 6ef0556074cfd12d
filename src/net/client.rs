use super::PageFetcher;
use crate::config;
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, Response};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Requests wait indefinitely unless `request_timeout` is set.
    pub fn new(request_timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder().default_headers(default_headers());
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AppError::from)?;
        Ok(HttpClient { client })
    }

    async fn get(&self, url: &str) -> AppResult<Response> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            let context_str = if e.is_timeout() {
                "Timeout"
            } else if e.is_connect() {
                "Connection"
            } else {
                "Request"
            };
            log(
                LogLevel::Warning,
                &format!("GET {} - {} Error: {}", url, context_str, e),
            );
            AppError::from(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            log(
                LogLevel::Warning,
                &format!(
                    "GET {} - HTTP {} ({})",
                    url,
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                ),
            );
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }
}

fn default_headers() -> header::HeaderMap {
    let mut h = header::HeaderMap::new();
    h.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static(config::USER_AGENT_VAL),
    );
    h
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_text(&self, url: &str) -> AppResult<String> {
        let resp = self.get(url).await?;
        resp.text().await.map_err(|e| {
            log(
                LogLevel::Warning,
                &format!("GET {} - Error reading response body: {}", url, e),
            );
            AppError::from(e)
        })
    }

    async fn fetch_bytes(&self, url: &str) -> AppResult<Bytes> {
        let resp = self.get(url).await?;
        resp.bytes().await.map_err(AppError::from)
    }
}
