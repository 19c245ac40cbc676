//! Error types for the equipment relay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed request to upstream service.";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// One of API_BASE_URL, API_PATH or API_TOKEN is empty
    #[error("Server configuration error: Missing API_BASE_URL, API_PATH, or API_TOKEN.")]
    Configuration,

    /// No response was obtained from the upstream service
    #[error("{0}")]
    Transport(String),

    /// Inbound request body is not valid JSON
    #[error("{0}")]
    InvalidBody(String),

    /// Upstream answered with a non-2xx status
    #[error("Failed request to upstream service.")]
    Upstream { status: StatusCode, details: Value },
}

/// Error body for failures that happen before an upstream response exists
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Envelope reporting a non-2xx upstream response
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamErrorResponse {
    pub error: String,
    /// Status code returned by the upstream service
    pub status_code: u16,
    /// Normalized upstream body
    #[schema(value_type = Object)]
    pub details: Value,
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::InvalidBody(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream { status, details } => {
                let body = Json(UpstreamErrorResponse {
                    error: UPSTREAM_FAILURE_MESSAGE.to_string(),
                    status_code: status.as_u16(),
                    details,
                });
                (status, body).into_response()
            }
            other => {
                if let AppError::Transport(msg) = &other {
                    tracing::warn!("Upstream transport error: {}", msg);
                }
                let body = Json(ErrorResponse {
                    error: other.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
