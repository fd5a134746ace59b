use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::database::RepositoryError;
use crate::domain::ValidationError;
use crate::features::books::model::ErrorResponse;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// written as-is when a payload cannot be encoded, so clients always get parseable JSON
const FALLBACK_BODY: &str = r#"{"error":"Internal server error"}"#;

pub fn respond_with_json<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(body) => json_response(status, body),
        Err(e) => {
            tracing::error!(error = %e, status = status.as_u16(), "failed to encode JSON response");
            json_response(StatusCode::INTERNAL_SERVER_ERROR, FALLBACK_BODY.as_bytes().to_vec())
        }
    }
}

pub fn respond_with_error(status: StatusCode, message: &str) -> Response {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), "responding with 5XX error: {}", message);
    }

    respond_with_json(
        status,
        &ErrorResponse {
            error: message.to_string(),
        },
    )
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// Everything a handler can fail with. The `Display` text is what gets logged;
/// clients only ever see the generic message from [`ApiError::public_message`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid book: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid book id: {0}")]
    InvalidId(String),

    #[error("book {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::Validation(_) | ApiError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) | ApiError::Validation(_) => "Invalid request",
            ApiError::InvalidId(_) => "Invalid book ID",
            ApiError::NotFound(_) => "Book not found",
            ApiError::Repository(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        respond_with_error(status, self.public_message())
    }
}
