//! Common error type and result alias.
//!
//! Every failure in the request pipeline ends up as an [`AppError`]; the
//! `IntoResponse` impl turns it into a status code plus a `{"detail": ...}`
//! body at the endpoint boundary.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub const MISSING_TOKEN_DETAIL: &str =
    "REPLICATE_API_TOKEN not configured. Please set environment variable.";

#[derive(Debug, Error)]
pub enum AppError {
    /// Required credential absent. Raised before any network I/O.
    #[error("{0}")]
    Configuration(String),

    /// Downloading the stock model image failed.
    #[error("Failed to fetch model image: {0}")]
    UpstreamFetch(String),

    /// The inference call failed or returned something unusable.
    #[error("Generation failed: {0}")]
    Provider(String),

    #[error("Generation failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Malformed upload.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Upload exceeded the configured body limit.
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn missing_token() -> Self {
        AppError::Configuration(MISSING_TOKEN_DETAIL.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UpstreamFetch(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_)
            | AppError::Provider(_)
            | AppError::HttpClient(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(status = %status, "request failed: {}", self);
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
