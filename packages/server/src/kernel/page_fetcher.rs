//! HTTP page fetcher for checks - reqwest with a browser identity
//!
//! One GET per check, bounded by a timeout. Redirects are followed up to
//! `MAX_REDIRECTS`; a longer chain is a failure like any other.
//!
//! Limitations:
//! - No JavaScript rendering (the raw HTML is what gets analyzed)

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::{BasePageFetcher, FetchError, FetchedPage};

/// Browser-like User-Agent; some servers reject unidentified clients
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default bound on a single fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirects followed before the fetch fails
pub const MAX_REDIRECTS: usize = 5;

/// Default cap on a response body (5 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Fetcher settings
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub timeout: Duration,
    pub user_agent: String,
    /// Bodies larger than this fail the fetch instead of being buffered
    pub max_body_bytes: usize,
    /// When true, non-2xx responses are returned as pages instead of errors
    pub record_error_status: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            record_error_status: false,
        }
    }
}

/// Page fetcher using reqwest
pub struct HttpPageFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
    record_error_status: bool,
}

impl HttpPageFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
            record_error_status: config.record_error_status,
        })
    }

    fn request_error(url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }

    fn body_error(url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                source: error,
            }
        }
    }

    fn too_large(&self, url: &str) -> FetchError {
        FetchError::TooLarge {
            url: url.to_string(),
            limit: self.max_body_bytes,
        }
    }
}

#[async_trait]
impl BasePageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        debug!(url = %url, "Fetching page");

        let mut response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            Self::request_error(url, e)
        })?;

        let status = response.status();
        if !status.is_success() && !self.record_error_status {
            warn!(url = %url, status = %status, "HTTP error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status_code: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes as u64 {
                warn!(url = %url, length, limit = self.max_body_bytes, "Declared body too large");
                return Err(self.too_large(url));
            }
        }

        // Content-Length can be absent or wrong, so count what actually arrives
        let mut buffer: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| Self::body_error(url, e))? {
            if buffer.len() + chunk.len() > self.max_body_bytes {
                warn!(url = %url, limit = self.max_body_bytes, "Body exceeded limit while reading");
                return Err(self.too_large(url));
            }
            buffer.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&buffer).into_owned();

        debug!(url = %url, status = %status, bytes = body.len(), "Fetched page");

        Ok(FetchedPage {
            status_code: status.as_u16(),
            body,
        })
    }
}
