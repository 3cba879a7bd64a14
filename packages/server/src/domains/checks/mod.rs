//! Checks domain - fetches a URL's page and records its SEO metadata

pub mod actions;
pub mod extraction;
pub mod models;

pub use actions::{run_check, CheckError};
pub use extraction::{extract, Metadata, MAX_TEXT_LENGTH};
pub use models::{NewUrlCheck, UrlCheck};
