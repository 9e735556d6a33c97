//! AI Core - Generative model client
//!
//! Provides an abstraction over a hosted generative model that can answer
//! with structured JSON text and with inline images. The bundled engine
//! talks to the Gemini `generateContent` REST API.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{GeneratedImage, GenerationRequest, GenerationResponse, InferenceEngine, TokenUsage};
