//! # Seine Fetch
//!
//! Reqwest-based implementation of the [`Fetcher`] port: bounded redirects,
//! connect and read timeouts, and a best-effort HEAD probe for live page
//! metadata. No retries: a failed page is reported as unavailable
//! and the caller moves on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::LAST_MODIFIED;
use reqwest::{redirect, Client, Response};
use seine_types::{FetchError, FetchedPage, Fetcher, PageProbe};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Fetcher configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// TCP connect deadline.
    pub connect_timeout: Duration,
    /// Total request deadline, covering headers and body.
    pub read_timeout: Duration,
    /// Maximum redirects followed before the request fails.
    pub max_redirects: usize,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
            max_redirects: 5,
            user_agent: "Seine/0.1".to_string(),
        }
    }
}

/// HTTP page fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Transport {
                message: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response)?;

        let last_modified = parse_last_modified(&response);
        let header_length = response.content_length();

        let body = response.text().await.map_err(map_reqwest_error)?;
        let content_length = header_length.unwrap_or(body.len() as u64);

        Ok(FetchedPage {
            body,
            last_modified,
            content_length,
        })
    }

    async fn probe(&self, url: &Url) -> Option<PageProbe> {
        let response = match self.client.head(url.clone()).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(url = %url, status = response.status().as_u16(), "probe rejected");
                return None;
            }
            Err(e) => {
                debug!(url = %url, error = %e, "probe failed");
                return None;
            }
        };

        Some(PageProbe {
            last_modified: parse_last_modified(&response),
            content_length: response.content_length(),
        })
    }
}

fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            code: status.as_u16(),
        })
    }
}

fn parse_last_modified(response: &Response) -> Option<DateTime<Utc>> {
    response
        .headers()
        .get(LAST_MODIFIED)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
        .map(|date| date.with_timezone(&Utc))
}

fn map_reqwest_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport {
            message: error.to_string(),
        }
    }
}
