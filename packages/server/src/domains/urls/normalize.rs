//! Validation and canonicalization of user-submitted URLs.
//!
//! A canonical URL is `scheme://host`: path, query, fragment, credentials and
//! port are dropped so that every page of a site maps to one stored row.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Upper bound (in characters) for submitted and stored URL names
pub const MAX_URL_LENGTH: usize = 255;

/// Why a submitted URL was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL is required")]
    Empty,

    #[error("URL exceeds {max} characters ({length})")]
    TooLong { length: usize, max: usize },

    #[error("not a valid absolute URL: {0}")]
    Malformed(String),

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// A validated `scheme://host` string, the deduplication key for URLs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate a raw submission and reduce it to its canonical form.
///
/// The length bound applies to the trimmed input and again to the canonical
/// form, since IDNA conversion of the host can make it longer.
pub fn validate_and_normalize(raw: &str) -> Result<CanonicalUrl, ValidationError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = input.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong {
            length,
            max: MAX_URL_LENGTH,
        });
    }

    let parsed = Url::parse(input).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ValidationError::UnsupportedScheme(scheme.to_string()));
    }

    // url already lowercases scheme and domain hosts
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(ValidationError::MissingHost)?;

    let canonical = format!("{}://{}", scheme, host);
    let length = canonical.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong {
            length,
            max: MAX_URL_LENGTH,
        });
    }

    Ok(CanonicalUrl(canonical))
}
