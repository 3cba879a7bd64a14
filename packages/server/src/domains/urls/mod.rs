//! URLs domain - validates, deduplicates and stores submitted sites

pub mod actions;
pub mod models;
pub mod normalize;

pub use actions::{submit_url, SubmitError};
pub use models::{FindOrCreate, Url};
pub use normalize::{validate_and_normalize, CanonicalUrl, ValidationError, MAX_URL_LENGTH};
