//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use analyzer_core::common::{CheckId, UrlId};
//!
//! let url_id = UrlId::from_i64(1);
//! let check_id = CheckId::from_i64(1);
//!
//! // This would be a compile error:
//! // let wrong: CheckId = url_id;
//! # let _ = (url_id, check_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for submitted URL entities.
pub struct SiteUrl;

/// Marker type for UrlCheck entities (one fetch-and-extract attempt).
pub struct Check;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for submitted URLs.
pub type UrlId = Id<SiteUrl>;

/// Typed ID for UrlCheck entities.
pub type CheckId = Id<Check>;
