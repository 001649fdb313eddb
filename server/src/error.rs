//! API error taxonomy and response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
///
/// Client mistakes (missing body, missing file part, bad document) map to
/// 400; everything else is a 500 carrying the raw error text. There are no
/// structured error codes beyond the status class.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body was empty or not JSON.
    #[error("No data provided")]
    MissingData,

    /// The multipart upload was missing or unusable.
    #[error("{0}")]
    UploadInput(String),

    /// The uploaded document could not be extracted.
    #[error(transparent)]
    Extraction(#[from] docxtract::Error),

    /// Catch-all; the message is surfaced verbatim to the caller.
    #[error("{0}")]
    Unexpected(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingData | ApiError::UploadInput(_) | ApiError::Extraction(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}
