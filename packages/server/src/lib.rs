// Page Analyzer - API Core
//
// Users submit site URLs and trigger checks that fetch the page and record
// its SEO metadata (status code, h1, title, meta description) as an
// append-only history per URL.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
