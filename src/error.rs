//! Error types for Foliochat
//!
//! All errors implement `IntoResponse` for Axum handlers. Responses carry a
//! generic message only; full detail stays in the server-side logs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::guard::validate::ValidationError;
use crate::provider::ProviderError;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("This client has been blocked")]
    Blocked,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Blocked and RateLimited share the "too many requests" surface;
            // the distinction lives in the logs only.
            Self::Blocked | Self::RateLimited => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            Self::InvalidInput(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Provider(ProviderError::Timeout { .. }) => (
                StatusCode::GATEWAY_TIMEOUT,
                "The assistant is taking too long to respond. Please try again.".to_string(),
            ),
            Self::Provider(_) => (
                StatusCode::BAD_GATEWAY,
                "The assistant is temporarily unavailable. Please try again.".to_string(),
            ),
            Self::Config(_)
            | Self::ConfigFileRead { .. }
            | Self::ConfigParseFailed { .. }
            | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
