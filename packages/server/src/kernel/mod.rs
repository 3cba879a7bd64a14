//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod page_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use page_fetcher::{
    FetcherConfig, HttpPageFetcher, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
    MAX_REDIRECTS,
};
pub use test_dependencies::{MockFetch, MockPageFetcher};
pub use traits::*;
