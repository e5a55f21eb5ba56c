//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// An assistant route was called without a configured provider.
    LlmUnavailable,
    /// Internal server error.
    Internal(String),
    /// Error from the sifter library.
    Sifter(sifter::SifterError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::LlmUnavailable => (
                StatusCode::BAD_REQUEST,
                "llm_unavailable",
                "LLM not configured. Restart with --llm huggingface (and HF_TOKEN set), --llm ollama, or --llm mock."
                    .to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Sifter(e) => (StatusCode::BAD_REQUEST, "invalid_data", e.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<sifter::SifterError> for ApiError {
    fn from(err: sifter::SifterError) -> Self {
        ApiError::Sifter(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::LlmUnavailable => write!(f, "LLM not configured"),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Sifter(e) => write!(f, "Sifter error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
