//! Server dependencies for actions (using traits for testability)
//!
//! The pool is the only shared state; every unit of work acquires a connection
//! from it and releases it when done.

use sqlx::PgPool;
use std::sync::Arc;

use crate::kernel::BasePageFetcher;

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub page_fetcher: Arc<dyn BasePageFetcher>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, page_fetcher: Arc<dyn BasePageFetcher>) -> Self {
        Self {
            db_pool,
            page_fetcher,
        }
    }
}
