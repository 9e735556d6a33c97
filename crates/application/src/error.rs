//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Generative model call failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Provider could not be reached or answered with a failure status
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Provider answered but the payload did not match the expected schema
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Provider did not answer in time
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// Local persistence failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether a later, user-initiated attempt could plausibly succeed
    ///
    /// Informational only: nothing in this crate retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ExternalService(_) | Self::Timeout(_) | Self::Inference(_)
        )
    }
}
