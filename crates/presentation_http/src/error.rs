//! API error handling
//!
//! Every failure leaves the server as `{error, code, details?, fields?}`.
//! `error` is a user-facing (Indonesian where the UI shows it) message;
//! provider internals only ever appear in `details`.

use std::collections::BTreeMap;

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::messages;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body failed field validation
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// A generative provider call failed
    #[error("{message}: {source}")]
    Upstream {
        message: String,
        #[source]
        source: ApplicationError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Provider failure during a recipe search, carrying the banner message
    pub fn suggestion_failed(source: ApplicationError) -> Self {
        warn!(error = %source, "Suggestion request failed");
        Self::Upstream {
            message: messages::SUGGESTION_FAILED.to_string(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream { source, .. } => match source {
                ApplicationError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                ApplicationError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::SERVICE_UNAVAILABLE,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Validation { .. } => "validation_error",
            Self::Upstream { source, .. } => match source {
                ApplicationError::Timeout(_) => "upstream_timeout",
                ApplicationError::InvalidResponse(_) => "upstream_invalid_response",
                _ => "upstream_unavailable",
            },
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let body = match self {
            Self::BadRequest(message) => ErrorResponse {
                error: message,
                code,
                details: None,
                fields: None,
            },
            Self::Validation { message, fields } => ErrorResponse {
                error: message,
                code,
                details: None,
                fields: Some(fields),
            },
            Self::Upstream { message, source } => ErrorResponse {
                error: message,
                code,
                details: Some(source.to_string()),
                fields: None,
            },
            Self::Internal(details) => ErrorResponse {
                error: "An internal error occurred".to_string(),
                code,
                details: Some(details),
                fields: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.user_message()),
            ApplicationError::Inference(_)
            | ApplicationError::ExternalService(_)
            | ApplicationError::InvalidResponse(_)
            | ApplicationError::Timeout(_) => Self::Upstream {
                message: "Provider request failed".to_string(),
                source: err,
            },
            ApplicationError::Storage(msg)
            | ApplicationError::Configuration(msg)
            | ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
