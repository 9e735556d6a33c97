//! Gemini REST client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::{
    config::InferenceConfig,
    error::InferenceError,
    ports::{GeneratedImage, GenerationRequest, GenerationResponse, InferenceEngine, TokenUsage},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Inference engine backed by the Gemini `generateContent` API
pub struct GeminiInferenceEngine {
    client: Client,
    config: InferenceConfig,
}

impl std::fmt::Debug for GeminiInferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiInferenceEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiInferenceEngine {
    /// Create a new Gemini inference engine
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            text_model = %config.text_model,
            image_model = %config.image_model,
            has_api_key = config.api_key().is_some(),
            "Initialized Gemini inference engine"
        );

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Build the URL for a model method, e.g. `models/x:generateContent`
    fn model_url(&self, model: &str, method: Option<&str>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match method {
            Some(method) => format!("{base}/models/{model}:{method}"),
            None => format!("{base}/models/{model}"),
        }
    }

    fn api_key(&self) -> Result<&str, InferenceError> {
        self.config.api_key().ok_or(InferenceError::MissingApiKey)
    }

    fn transport_error(&self, err: &reqwest::Error) -> InferenceError {
        InferenceError::from_transport(err, self.config.timeout_ms)
    }

    async fn post_generate(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InferenceError> {
        let key = self.api_key()?;

        let response = self
            .client
            .post(self.model_url(model, Some("generateContent")))
            .header(API_KEY_HEADER, key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        self.parse(response).await
    }

    async fn parse<T: DeserializeOwned>(&self, response: Response) -> Result<T, InferenceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Gemini request failed");
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(InferenceError::RateLimited);
            }
            return Err(InferenceError::ServerError(format!(
                "Status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))
    }
}

fn usage_of(response: &GenerateContentResponse) -> Option<TokenUsage> {
    let usage = response.usage_metadata.as_ref()?;
    let prompt = usage.prompt_token_count.unwrap_or(0);
    let completion = usage.candidates_token_count.unwrap_or(0);
    Some(TokenUsage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: usage.total_token_count.unwrap_or(prompt + completion),
    })
}

fn ensure_not_blocked(response: &GenerateContentResponse) -> Result<(), InferenceError> {
    match response.block_reason() {
        Some(reason) if response.parts().is_empty() => {
            Err(InferenceError::Blocked(reason.to_string()))
        },
        _ => Ok(()),
    }
}

#[async_trait]
impl InferenceEngine for GeminiInferenceEngine {
    #[instrument(skip(self, request), fields(model = request.model.as_deref().unwrap_or(&self.config.text_model)))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, InferenceError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.text_model.clone());

        let structured = request.response_schema.is_some();
        let body = GenerateContentRequest {
            contents: vec![Content::user(request.prompt)],
            system_instruction: request.system.map(Content::system),
            generation_config: GenerationConfig {
                temperature: request.temperature.or(Some(self.config.temperature)),
                max_output_tokens: Some(self.config.max_output_tokens),
                response_mime_type: structured.then(|| "application/json".to_string()),
                response_schema: request.response_schema,
                response_modalities: None,
            },
        };

        debug!(structured, "Sending generateContent request");

        let response = self.post_generate(&model, &body).await?;
        ensure_not_blocked(&response)?;

        let content = response.text();
        if content.trim().is_empty() {
            return Err(InferenceError::InvalidResponse(
                "Response contained no text".to_string(),
            ));
        }

        let usage = usage_of(&response);
        debug!(tokens = ?usage, "Generation completed");

        Ok(GenerationResponse {
            content,
            model: response.model_version.clone().unwrap_or(model),
            usage,
            finish_reason: response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone()),
        })
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.image_model))]
    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, InferenceError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: None,
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                ..GenerationConfig::default()
            },
        };

        let response = self.post_generate(&self.config.image_model, &body).await?;
        ensure_not_blocked(&response)?;

        let image = response.first_inline_data().map(|inline| GeneratedImage {
            mime_type: inline.mime_type.clone(),
            data: inline.data.clone(),
        });

        if image.is_none() {
            debug!("Image response contained no inline image");
        }

        Ok(image)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let key = self.api_key()?;

        let response = self
            .client
            .get(self.model_url(&self.config.text_model, None))
            .header(API_KEY_HEADER, key)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        Ok(response.status().is_success())
    }

    fn default_model(&self) -> &str {
        &self.config.text_model
    }

    fn image_model(&self) -> &str {
        &self.config.image_model
    }
}
