//! Application setup and server configuration.

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::kernel::{BasePageFetcher, ServerDeps};
use crate::server::routes::{
    health_handler, list_urls_handler, run_check_handler, show_url_handler, submit_url_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub server_deps: ServerDeps,
}

/// Build the Axum application router
///
/// Handlers get the pool and page fetcher through `Extension<AppState>`; each
/// request acquires its own pooled connection.
pub fn build_app(pool: PgPool, page_fetcher: Arc<dyn BasePageFetcher>) -> Router {
    let state = AppState {
        server_deps: ServerDeps::new(pool, page_fetcher),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/urls", get(list_urls_handler).post(submit_url_handler))
        .route("/urls/:id", get(show_url_handler))
        .route("/urls/:id/checks", post(run_check_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
