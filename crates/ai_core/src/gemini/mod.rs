//! Gemini inference engine implementation
//!
//! Talks to the `generateContent` endpoint of the Generative Language API.

mod client;
mod types;

pub use client::GeminiInferenceEngine;
