use axum::{
    extract::{Extension, Path},
    response::Response,
};

use crate::domains::checks::{run_check, CheckError};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::flash::Flash;
use crate::server::routes::urls::{parse_url_id, redirect_with_flash};

/// POST /urls/:id/checks - fetch the page now and record the result
///
/// Fetch failures still redirect to the detail view, with a danger flash.
pub async fn run_check_handler(
    Extension(state): Extension<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_url_id(&raw_id)?;

    match run_check(id, &state.server_deps).await {
        Ok(_) => Ok(redirect_with_flash(id, Flash::success("Page successfully checked"))),
        Err(CheckError::Fetch(_)) => Ok(redirect_with_flash(
            id,
            Flash::danger("An error occurred during the check"),
        )),
        Err(CheckError::UrlNotFound(_)) => Err(ApiError::NotFound),
        Err(CheckError::Storage(e)) => {
            tracing::error!(url_id = %id, error = %e, "Check could not be stored");
            Err(ApiError::Internal)
        }
    }
}
