//! Custom error types for the watchlist service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the watchlist service
///
/// The display string of each variant is the message sent to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No authenticated user
    #[error("Unauthorized")]
    Unauthorized,

    /// Missing or invalid input
    #[error("{0}")]
    BadRequest(String),

    /// Referenced resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Write rejected by a uniqueness rule
    #[error("{0}")]
    Conflict(String),

    /// Unclassified failure, details stay in the logs
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
