//! Mapping of domain failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::server::flash::Flash;

#[derive(Debug)]
pub enum ApiError {
    /// Submitted URL rejected; the raw input is echoed back for correction
    InvalidUrl { input: String, reason: String },
    NotFound,
    /// Details are logged where the error happened, never sent to the client
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    flash: Option<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidUrl { input, reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    flash: Some(Flash::danger("Invalid URL")),
                    url: Some(input),
                    error: reason,
                }),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    flash: None,
                    url: None,
                    error: "Not found".to_string(),
                }),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    flash: Some(Flash::danger("Something went wrong, please try again")),
                    url: None,
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
