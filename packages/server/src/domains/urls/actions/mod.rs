//! URL domain actions - business logic functions

use thiserror::Error;
use tracing::info;

use crate::domains::urls::models::{FindOrCreate, Url};
use crate::domains::urls::normalize::{validate_and_normalize, ValidationError};
use crate::kernel::ServerDeps;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid URL: {0}")]
    Invalid(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Submit a raw URL: validate, canonicalize, then create or find the stored row.
///
/// Validation happens before any store access; resubmitting a known site
/// returns `FindOrCreate::Existing` with the stored row.
pub async fn submit_url(raw: &str, deps: &ServerDeps) -> Result<FindOrCreate, SubmitError> {
    let name = validate_and_normalize(raw)?;
    info!(url = %name, "Submitting URL");

    let outcome = Url::find_or_create(&name, &deps.db_pool).await?;
    info!(
        url_id = %outcome.url().id,
        url = %name,
        created = outcome.was_created(),
        "URL submitted"
    );
    Ok(outcome)
}
