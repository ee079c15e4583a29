//! Custom error types for the back-office API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;

/// Custom error type for the back-office API
#[derive(Error, Debug)]
pub enum ApiError {
    /// No resolvable session on a protected route
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The identity provider rejected the session exchange
    #[error("Invalid session")]
    InvalidSession,

    /// Login failed for an internal reason; detail stays in the logs
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The verified email is not whitelisted
    #[error("access denied for {email}")]
    AccessDenied { email: String },

    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// Missing entity, message names it in the operator's language
    #[error("{0}")]
    NotFound(String),

    /// Document store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Not authenticated"}),
            ),
            ApiError::InvalidSession => {
                (StatusCode::UNAUTHORIZED, json!({"error": "Invalid session"}))
            }
            ApiError::AuthenticationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Authentication failed"}),
            ),
            ApiError::AccessDenied { email } => (
                StatusCode::FORBIDDEN,
                json!({"error": "access_denied", "email": email}),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({"error": msg})),
            ApiError::Store(err) => {
                tracing::error!("Store operation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
