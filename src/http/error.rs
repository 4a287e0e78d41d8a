//! Request-level errors and their HTTP mapping.
//!
//! Every variant becomes a bare status code: clients get no error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::negotiate::CodecError;

/// Terminal outcome of a failed request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested identifier is not in the store.
    #[error("product not found")]
    NotFound,

    /// Missing or malformed input, or a path/body identifier mismatch.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body in a format the service does not read.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Request body over the configured size limit.
    #[error("request body too large")]
    PayloadTooLarge,

    /// A representation could not be encoded.
    #[error("failed to encode response: {0}")]
    Encode(#[from] CodecError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Encode(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }
        status.into_response()
    }
}
