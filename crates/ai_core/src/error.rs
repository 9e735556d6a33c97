//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the model API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// No API key configured
    #[error("No API key configured")]
    MissingApiKey,

    /// Response parsing failed or the payload was unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The prompt was refused by the provider's safety filters
    #[error("Prompt blocked: {0}")]
    Blocked(String),

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl InferenceError {
    /// Classify a transport failure
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            InferenceError::Timeout(5000).to_string(),
            "Inference timeout after 5000ms"
        );
        assert_eq!(InferenceError::MissingApiKey.to_string(), "No API key configured");
        assert_eq!(
            InferenceError::Blocked("SAFETY".to_string()).to_string(),
            "Prompt blocked: SAFETY"
        );
    }
}
