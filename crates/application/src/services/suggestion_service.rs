//! Suggestion service - One provider round trip per submission

use std::{fmt, sync::Arc, time::Instant};

use domain::{PLACEHOLDER_IMAGE_URL, Recipe, SuggestionRequest};
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::SuggestionPort};

/// Requests recipe suggestions and prepares them for display
///
/// Each call issues exactly one provider request: no caching, no retry.
pub struct SuggestionService {
    provider: Arc<dyn SuggestionPort>,
    placeholder: String,
}

impl fmt::Debug for SuggestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionService")
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

impl SuggestionService {
    pub fn new(provider: Arc<dyn SuggestionPort>) -> Self {
        Self {
            provider,
            placeholder: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    /// Use a different placeholder image for new recipes
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Ask the provider for recipes
    ///
    /// Provider order is preserved. Entries without a title, ingredients or
    /// steps are dropped; every returned recipe carries the placeholder image.
    #[instrument(skip(self, request), fields(tools = request.cooking_tools().len()))]
    pub async fn get_suggestions(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<Recipe>, ApplicationError> {
        let start = Instant::now();

        let raw = self.provider.suggest(request).await.inspect_err(|e| {
            warn!(error = %e, "Suggestion provider call failed");
        })?;

        let received = raw.len();
        let recipes: Vec<Recipe> = raw
            .into_iter()
            .filter(Recipe::is_complete)
            .map(|recipe| recipe.with_placeholder(self.placeholder.as_str()))
            .collect();

        if recipes.len() < received {
            warn!(
                dropped = received - recipes.len(),
                "Dropped incomplete recipe suggestions"
            );
        }

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            recipe_count = recipes.len(),
            latency_ms, "Suggestions received"
        );

        Ok(recipes)
    }

    /// Check if the suggestion provider is reachable
    pub async fn is_healthy(&self) -> bool {
        self.provider.is_healthy().await
    }

    pub fn model_name(&self) -> String {
        self.provider.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockSuggestionPort;

    fn request() -> SuggestionRequest {
        SuggestionRequest::from_raw("mie instan, telur", "panci, kompor").unwrap()
    }

    fn recipe(title: &str) -> Recipe {
        Recipe::new(
            title,
            "enak",
            vec!["telur".to_string()],
            vec!["rebus".to_string()],
        )
        .with_placeholder("https://provider.example/should-be-replaced.png")
    }

    #[tokio::test]
    async fn preserves_provider_order_and_sets_placeholder() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .times(1)
            .returning(|_| Ok(vec![recipe("B"), recipe("A"), recipe("C")]));

        let service = SuggestionService::new(Arc::new(mock));
        let recipes = service.get_suggestions(&request()).await.unwrap();

        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
        assert!(recipes.iter().all(|r| r.image_url == PLACEHOLDER_IMAGE_URL));
    }

    #[tokio::test]
    async fn custom_placeholder_is_applied() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().returning(|_| Ok(vec![recipe("A")]));

        let service = SuggestionService::new(Arc::new(mock)).with_placeholder("/img/plate.png");
        let recipes = service.get_suggestions(&request()).await.unwrap();
        assert_eq!(recipes[0].image_url, "/img/plate.png");
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().returning(|_| Ok(Vec::new()));

        let service = SuggestionService::new(Arc::new(mock));
        let recipes = service.get_suggestions(&request()).await.unwrap();
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn incomplete_entries_are_dropped() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest().returning(|_| {
            let mut broken = recipe("Broken");
            broken.steps.clear();
            Ok(vec![recipe("A"), broken, recipe("C")])
        });

        let service = SuggestionService::new(Arc::new(mock));
        let recipes = service.get_suggestions(&request()).await.unwrap();
        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn provider_failure_propagates_without_retry() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .times(1)
            .returning(|_| Err(ApplicationError::ExternalService("boom".to_string())));

        let service = SuggestionService::new(Arc::new(mock));
        let result = service.get_suggestions(&request()).await;
        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
    }

    #[tokio::test]
    async fn identical_requests_reach_the_provider_twice() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_suggest()
            .times(2)
            .returning(|_| Ok(vec![recipe("A")]));

        let service = SuggestionService::new(Arc::new(mock));
        let req = request();
        service.get_suggestions(&req).await.unwrap();
        service.get_suggestions(&req).await.unwrap();
    }

    #[tokio::test]
    async fn health_and_model_are_delegated() {
        let mut mock = MockSuggestionPort::new();
        mock.expect_is_healthy().returning(|| true);
        mock.expect_model_name()
            .returning(|| "gemini-2.0-flash".to_string());

        let service = SuggestionService::new(Arc::new(mock));
        assert!(service.is_healthy().await);
        assert_eq!(service.model_name(), "gemini-2.0-flash");
    }
}
