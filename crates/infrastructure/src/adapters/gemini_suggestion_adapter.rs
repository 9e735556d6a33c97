//! Gemini suggestion adapter - Implements SuggestionPort using ai_core
//!
//! Asks the text model for JSON constrained by a response schema and parses
//! it strictly: any item missing a required field fails the whole response.

use std::{sync::Arc, time::Instant};

use ai_core::{GeminiInferenceEngine, GenerationRequest, InferenceConfig, InferenceEngine};
use application::{ApplicationError, ports::SuggestionPort};
use async_trait::async_trait;
use domain::{Recipe, SuggestionRequest};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::map_inference_error;

const SYSTEM_PROMPT: &str = "Kamu adalah koki rumahan yang membantu anak kos memasak. \
Sarankan resep sederhana yang hanya memakai bahan dan alat masak yang disebutkan \
(bumbu dapur umum seperti garam, gula, minyak dan air boleh dianggap tersedia). \
Urutkan resep dari yang paling cocok. Tulis semua teks dalam Bahasa Indonesia.";

/// Response schema in the provider's OpenAPI subset
pub fn suggestion_schema() -> serde_json::Value {
    let text_list = json!({"type": "ARRAY", "items": {"type": "STRING"}});
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING", "description": "Nama masakan"},
                        "description": {"type": "STRING", "description": "Deskripsi singkat"},
                        "ingredients": text_list,
                        "steps": text_list,
                        "servings": {"type": "STRING", "description": "Contoh: 2 porsi"},
                        "prepTime": {"type": "STRING", "description": "Contoh: 15 menit"}
                    },
                    "required": ["title", "description", "ingredients", "steps"],
                    "propertyOrdering": [
                        "title", "description", "ingredients", "steps", "servings", "prepTime"
                    ]
                }
            }
        },
        "required": ["suggestions"]
    })
}

fn user_prompt(request: &SuggestionRequest) -> String {
    format!(
        "Bahan yang tersedia: {}\nAlat masak yang tersedia: {}\n\
         Berikan beberapa ide resep beserta bahan (dengan takaran) dan langkah memasaknya.",
        request.ingredients(),
        request.cooking_tools_joined()
    )
}

#[derive(Debug, Deserialize)]
struct SuggestionEnvelope {
    suggestions: Vec<SuggestionItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionItem {
    title: String,
    description: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    #[serde(default)]
    servings: Option<String>,
    #[serde(default)]
    prep_time: Option<String>,
}

impl From<SuggestionItem> for Recipe {
    fn from(item: SuggestionItem) -> Self {
        let mut recipe = Self::new(item.title, item.description, item.ingredients, item.steps);
        recipe.servings = item.servings.filter(|s| !s.trim().is_empty());
        recipe.prep_time = item.prep_time.filter(|s| !s.trim().is_empty());
        recipe
    }
}

/// Parse the model's JSON answer into recipes, in provider order
fn parse_suggestions(content: &str) -> Result<Vec<Recipe>, ApplicationError> {
    let envelope: SuggestionEnvelope = serde_json::from_str(content.trim()).map_err(|e| {
        ApplicationError::InvalidResponse(format!("Suggestion response does not match schema: {e}"))
    })?;
    Ok(envelope.suggestions.into_iter().map(Recipe::from).collect())
}

/// Suggestion provider backed by a Gemini text model
pub struct GeminiSuggestionAdapter {
    engine: Arc<dyn InferenceEngine>,
    temperature: Option<f32>,
}

impl std::fmt::Debug for GeminiSuggestionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSuggestionAdapter")
            .field("model", &self.engine.default_model())
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GeminiSuggestionAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiInferenceEngine::new(config).map_err(map_inference_error)?;
        Ok(Self::from_engine(Arc::new(engine)))
    }

    /// Share an existing engine
    pub fn from_engine(engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            engine,
            temperature: None,
        }
    }

    /// Override the engine's default sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
impl SuggestionPort for GeminiSuggestionAdapter {
    #[instrument(skip(self, request), fields(model = %self.engine.default_model()))]
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Recipe>, ApplicationError> {
        let start = Instant::now();

        let mut generation = GenerationRequest::with_system(SYSTEM_PROMPT, user_prompt(request))
            .with_schema(suggestion_schema());
        if let Some(temperature) = self.temperature {
            generation = generation.with_temperature(temperature);
        }

        let response = self
            .engine
            .generate(generation)
            .await
            .map_err(map_inference_error)?;

        let recipes = parse_suggestions(&response.content).inspect_err(|e| {
            warn!(error = %e, "Discarding malformed suggestion response");
        })?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;
        debug!(
            recipe_count = recipes.len(),
            latency_ms,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Suggestions parsed"
        );

        Ok(recipes)
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Gemini health check failed");
                false
            },
        }
    }

    fn model_name(&self) -> String {
        self.engine.default_model().to_string()
    }
}
