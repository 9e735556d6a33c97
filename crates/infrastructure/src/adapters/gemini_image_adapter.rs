//! Gemini image adapter - Implements ImagePort using ai_core

use std::{sync::Arc, time::Instant};

use ai_core::{GeminiInferenceEngine, GeneratedImage, InferenceConfig, InferenceEngine};
use application::{ApplicationError, ports::ImagePort};
use async_trait::async_trait;
use tracing::{debug, instrument};

use super::map_inference_error;

/// Prompt asking for an appetizing photo of a dish
pub fn image_prompt(title: &str) -> String {
    format!("A delicious-looking, realistic photo of \"{title}\", plated beautifully.")
}

/// Image provider backed by a Gemini image-capable model
///
/// Successful answers are returned as `data:` URIs. An answer without an
/// image part yields an empty string, which callers replace with their
/// placeholder.
pub struct GeminiImageAdapter {
    engine: Arc<dyn InferenceEngine>,
}

impl std::fmt::Debug for GeminiImageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiImageAdapter")
            .field("model", &self.engine.image_model())
            .finish_non_exhaustive()
    }
}

impl GeminiImageAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiInferenceEngine::new(config).map_err(map_inference_error)?;
        Ok(Self::from_engine(Arc::new(engine)))
    }

    /// Share an existing engine
    pub fn from_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ImagePort for GeminiImageAdapter {
    #[instrument(skip(self), fields(model = %self.engine.image_model()))]
    async fn generate_image(&self, title: &str) -> Result<String, ApplicationError> {
        let start = Instant::now();

        let image = self
            .engine
            .generate_image(&image_prompt(title))
            .await
            .map_err(map_inference_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(has_image = image.is_some(), latency_ms, "Image generation completed");

        Ok(image
            .as_ref()
            .map(GeneratedImage::to_data_uri)
            .unwrap_or_default())
    }
}
