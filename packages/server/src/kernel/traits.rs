// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "run a check") lives in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BasePageFetcher)

use async_trait::async_trait;
use thiserror::Error;

// =============================================================================
// Page Fetcher Trait (Infrastructure - single-page HTTP GET)
// =============================================================================

/// A page that answered the GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body: String,
}

/// Why a page could not be fetched.
///
/// Callers treat every variant the same way ("check failed"); the variants only
/// exist so the cause can be logged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request never produced a usable response (DNS, refused connection, TLS, redirects)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request exceeded the configured timeout
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Server answered with a non-2xx status
    #[error("{url} answered with HTTP {status_code}")]
    Status { url: String, status_code: u16 },

    /// Response body is larger than the fetcher accepts
    #[error("response from {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },

    /// Response body could not be read
    #[error("failed to read body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait BasePageFetcher: Send + Sync {
    /// Issue a single GET against `url`. No retries.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
