use axum::{
    extract::{Extension, Path},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::common::UrlId;
use crate::domains::checks::UrlCheck;
use crate::domains::urls::{submit_url, FindOrCreate, SubmitError, Url};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::flash::Flash;

#[derive(Debug, Deserialize)]
pub struct SubmitUrlForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct UrlListResponse {
    urls: Vec<Url>,
}

#[derive(Serialize)]
pub struct UrlDetailResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    flash: Option<Flash>,
    url: Url,
    checks: Vec<UrlCheck>,
}

/// Canonical location of a URL's detail view
pub fn url_location(id: UrlId) -> String {
    format!("/urls/{}", id)
}

/// Path ids that do not parse are unknown ids
pub(crate) fn parse_url_id(raw: &str) -> Result<UrlId, ApiError> {
    UrlId::parse(raw).map_err(|_| ApiError::NotFound)
}

/// Redirect to the detail view, leaving a flash message for it
pub(crate) fn redirect_with_flash(id: UrlId, flash: Flash) -> Response {
    (
        [(header::SET_COOKIE, flash.to_cookie())],
        Redirect::to(&url_location(id)),
    )
        .into_response()
}

/// GET /urls - every URL with its last check summary, newest first
pub async fn list_urls_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<UrlListResponse>, ApiError> {
    let urls = Url::list_with_last_check(&state.server_deps.db_pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list URLs");
            ApiError::Internal
        })?;
    Ok(Json(UrlListResponse { urls }))
}

/// POST /urls - submit a URL (form field `url`)
pub async fn submit_url_handler(
    Extension(state): Extension<AppState>,
    Form(form): Form<SubmitUrlForm>,
) -> Result<Response, ApiError> {
    match submit_url(&form.url, &state.server_deps).await {
        Ok(FindOrCreate::Created(url)) => Ok(redirect_with_flash(
            url.id,
            Flash::success("Page successfully added"),
        )),
        Ok(FindOrCreate::Existing(url)) => {
            Ok(redirect_with_flash(url.id, Flash::info("Page already exists")))
        }
        Err(SubmitError::Invalid(reason)) => Err(ApiError::InvalidUrl {
            input: form.url,
            reason: reason.to_string(),
        }),
        Err(SubmitError::Storage(e)) => {
            tracing::error!(error = %e, "Failed to store submitted URL");
            Err(ApiError::Internal)
        }
    }
}

/// GET /urls/:id - a URL and its check history; consumes any pending flash
pub async fn show_url_handler(
    Extension(state): Extension<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = parse_url_id(&raw_id)?;
    let pool = &state.server_deps.db_pool;

    let url = Url::find_by_id(id, pool)
        .await
        .map_err(|e| {
            tracing::error!(url_id = %id, error = %e, "Failed to load URL");
            ApiError::Internal
        })?
        .ok_or(ApiError::NotFound)?;

    let checks = UrlCheck::find_by_url(id, pool).await.map_err(|e| {
        tracing::error!(url_id = %id, error = %e, "Failed to load checks");
        ApiError::Internal
    })?;

    let flash = Flash::from_headers(&headers);
    let body = Json(UrlDetailResponse {
        flash: flash.clone(),
        url,
        checks,
    });

    Ok(match flash {
        Some(_) => ([(header::SET_COOKIE, Flash::clear_cookie())], body).into_response(),
        None => body.into_response(),
    })
}
