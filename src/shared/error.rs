//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Not-found and unauthorized responses always carry the same message so a
//! caller cannot tell "absent" from "exists but not yours".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message used for every 401 response.
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Message used for every 404 response.
pub const NOT_FOUND: &str = "Not found";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input, or a broken parent reference.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Attempt to fetch bytes of an entry that has none (folders).
    #[error("Content error: {0}")]
    ContentType(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::ContentType(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) | AppError::Database(_) | AppError::Redis(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Internal(_) | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg) | AppError::ContentType(msg) => msg.clone(),
            AppError::Unauthorized => UNAUTHORIZED.into(),
            AppError::NotFound => NOT_FOUND.into(),
            AppError::Unavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                "Service unavailable".into()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Service unavailable".into()
            }
            AppError::Redis(e) => {
                tracing::error!("Redis error: {}", e);
                "Service unavailable".into()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".into()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                "Internal server error".into()
            }
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}
