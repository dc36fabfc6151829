//! REST API handlers and the shared error response.

pub mod form;
pub mod images;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Prefix for failures on `POST /upload`.
pub const UPLOAD_CONTEXT: &str = "Error uploading image";
/// Prefix for failures on `POST /crop`.
pub const PROCESS_CONTEXT: &str = "Error processing image";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// The only error surfaced to clients. Always rendered as HTTP 400.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{context}: {message}")]
    Client {
        context: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn client(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Client {
            context,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::warn!(%detail, "Rejecting request");
        (StatusCode::BAD_REQUEST, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_error_formats_detail() {
        let err = ApiError::client(PROCESS_CONTEXT, "bad things");
        assert_eq!(err.to_string(), "Error processing image: bad things");
    }

    #[test]
    fn client_error_is_bad_request() {
        let resp = ApiError::client(UPLOAD_CONTEXT, "nope").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
