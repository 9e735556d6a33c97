//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod gemini_image_adapter;
mod gemini_suggestion_adapter;

use ai_core::InferenceError;
use application::ApplicationError;

pub use gemini_image_adapter::{GeminiImageAdapter, image_prompt};
pub use gemini_suggestion_adapter::{GeminiSuggestionAdapter, suggestion_schema};

/// Convert ai_core error to application error
pub(crate) fn map_inference_error(e: InferenceError) -> ApplicationError {
    match e {
        InferenceError::ConnectionFailed(msg) => {
            ApplicationError::ExternalService(format!("Gemini connection failed: {msg}"))
        },
        InferenceError::RateLimited => {
            ApplicationError::ExternalService("Gemini rate limit exceeded".to_string())
        },
        InferenceError::ServerError(msg) => ApplicationError::ExternalService(msg),
        InferenceError::Timeout(ms) => ApplicationError::Timeout(ms),
        InferenceError::InvalidResponse(msg) => ApplicationError::InvalidResponse(msg),
        InferenceError::MissingApiKey => {
            ApplicationError::Configuration("Gemini API key is not configured".to_string())
        },
        other => ApplicationError::Inference(other.to_string()),
    }
}
