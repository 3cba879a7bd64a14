//! Local HTTP server standing in for the sites being checked.

use analyzer_core::kernel::{
    BasePageFetcher, FetchError, FetchedPage, FetcherConfig, HttpPageFetcher,
};
use async_trait::async_trait;
use axum::{
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Stub Home</title>
    <meta name="description" content="A page served by the test stub">
  </head>
  <body><h1>Welcome</h1></body>
</html>"#;

/// Size of the body served at `/large`
pub const LARGE_PAGE_BYTES: usize = 64 * 1024;

/// Stub server bound to an ephemeral port; aborted on drop
pub struct StubServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/", get(|| async { Html(HOME_PAGE) }))
            .route(
                "/error",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>Err</h1>")) }),
            )
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, Html("<title>Not Found</title>")) }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Html("<h1>Too late</h1>")
                }),
            )
            .route(
                "/large",
                get(|| async { Html("x".repeat(LARGE_PAGE_BYTES)) }),
            )
            .route(
                "/user-agent",
                get(|headers: HeaderMap| async move {
                    headers
                        .get(header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                }),
            )
            .route(
                "/redirect/:hops",
                get(|Path(hops): Path<u32>| async move {
                    if hops == 0 {
                        Html("<h1>Landed</h1>").into_response()
                    } else {
                        Redirect::temporary(&format!("/redirect/{}", hops - 1)).into_response()
                    }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Stub server has no address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An address nothing listens on (bound, then released)
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}", addr)
}

/// Real HTTP fetcher that sends every request to one fixed address.
///
/// Stored URL names are `scheme://host` only, so a check can never name the
/// stub's port or route itself; this fetcher supplies both.
pub struct PinnedFetcher {
    inner: HttpPageFetcher,
    target: String,
}

impl PinnedFetcher {
    pub fn new(config: FetcherConfig, target: String) -> Self {
        Self {
            inner: HttpPageFetcher::new(config).expect("Failed to build fetcher"),
            target,
        }
    }
}

#[async_trait]
impl BasePageFetcher for PinnedFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedPage, FetchError> {
        self.inner.fetch(&self.target).await
    }
}
