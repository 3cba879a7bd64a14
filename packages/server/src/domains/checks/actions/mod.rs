//! Check domain actions - business logic functions

use thiserror::Error;
use tracing::{error, info, warn};

use crate::common::UrlId;
use crate::domains::checks::extraction::extract;
use crate::domains::checks::models::{NewUrlCheck, UrlCheck};
use crate::domains::urls::Url;
use crate::kernel::{FetchError, ServerDeps};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("URL {0} not found")]
    UrlNotFound(UrlId),

    #[error("check failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Fetch the URL's page, extract its metadata and record the check.
///
/// A fetch failure writes nothing, so the URL summary stays as it was.
pub async fn run_check(url_id: UrlId, deps: &ServerDeps) -> Result<UrlCheck, CheckError> {
    let url = Url::find_by_id(url_id, &deps.db_pool)
        .await?
        .ok_or(CheckError::UrlNotFound(url_id))?;

    info!(url_id = %url_id, url = %url.name, "Running check");

    let page = deps.page_fetcher.fetch(&url.name).await.map_err(|e| {
        warn!(url_id = %url_id, url = %url.name, error = %e, "Check fetch failed");
        e
    })?;

    let metadata = extract(&page.body);
    let new_check = NewUrlCheck::new(url_id, page.status_code, metadata)?;

    let check = UrlCheck::record(new_check, &deps.db_pool).await.map_err(|e| {
        error!(url_id = %url_id, error = %e, "Failed to record check");
        CheckError::Storage(e)
    })?;

    info!(
        url_id = %url_id,
        check_id = %check.id,
        status_code = page.status_code,
        "Check recorded"
    );
    Ok(check)
}
