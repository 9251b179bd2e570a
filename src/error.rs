//! Error types for the catalog gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Catalog Error Enum ==
/// Unified error type for the catalog gateway.
///
/// The type is `Clone` so that callers sharing one in-flight origin request
/// can all receive the same failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The origin answered but reported a failure
    #[error("Origin error {code}: {message}")]
    Origin { code: i64, message: String },

    /// The origin could not be reached or its response could not be read
    #[error("Transport error: {message}")]
    Transport { message: String, timed_out: bool },

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to serialize arguments or payloads
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Message without the variant prefix, as reported in batch failures.
    pub fn reason(&self) -> String {
        match self {
            CatalogError::Origin { message, .. } => message.clone(),
            CatalogError::Transport { message, .. } => message.clone(),
            CatalogError::Configuration(msg)
            | CatalogError::InvalidRequest(msg)
            | CatalogError::NotFound(msg)
            | CatalogError::Serialization(msg)
            | CatalogError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Serialization(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::Origin { .. } => StatusCode::BAD_GATEWAY,
            CatalogError::Transport { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            CatalogError::Transport { .. } => StatusCode::BAD_GATEWAY,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Configuration(_)
            | CatalogError::Serialization(_)
            | CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            CatalogError::Origin { code, message } => Json(json!({
                "error": message,
                "code": code
            })),
            other => Json(json!({
                "error": other.reason()
            })),
        };

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog gateway.
pub type Result<T> = std::result::Result<T, CatalogError>;
