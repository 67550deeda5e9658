// error.rs — REST error surface. Every failure renders as `{ "error": … }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors a route handler can surface to the client.
///
/// Internal causes are logged at the call site before one of these is
/// returned; the response body carries the static message only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request body is missing a required field.
    #[error("{0}")]
    BadRequest(&'static str),
    /// The generative backend failed or returned an unusable response.
    #[error("{0}")]
    Engine(&'static str),
    /// Quote dispatch failed.
    #[error("Failed to send email")]
    MailSend,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Engine(_) | ApiError::MailSend => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
