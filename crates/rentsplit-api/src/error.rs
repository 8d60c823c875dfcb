//! Error handling for the rentsplit API
//!
//! The allocation engine never fails; everything here belongs to the layers
//! around it (input validation, configuration). Each variant maps to an
//! HTTP status code and a stable error code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed input values (400 Bad Request)
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Input larger than the configured limits (400 Bad Request)
    #[error("Limit exceeded: {message}")]
    LimitExceeded { message: String, limit: usize },

    /// Configuration errors (500 Internal Server Error)
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::LimitExceeded { .. } => StatusCode::BAD_REQUEST,
            ApiError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            ApiError::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }

    pub fn to_response(&self) -> ApiErrorResponse {
        let mut details = serde_json::Map::new();

        match self {
            ApiError::Validation { field: Some(field), .. } => {
                details.insert("field".to_string(), serde_json::Value::String(field.clone()));
            }
            ApiError::LimitExceeded { limit, .. } => {
                details.insert("limit".to_string(), serde_json::Value::Number((*limit).into()));
            }
            _ => {}
        }

        ApiErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: (!details.is_empty()).then_some(serde_json::Value::Object(details)),
        }
    }

    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        ApiError::Validation { message: message.into(), field: Some(field.into()) }
    }

    pub fn limit_exceeded(message: impl Into<String>, limit: usize) -> Self {
        ApiError::LimitExceeded { message: message.into(), limit }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ApiError::Configuration { message: message.into() }
    }
}

/// JSON-serializable error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "Request failed");
        } else {
            warn!(code = self.error_code(), error = %self, "Request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}
