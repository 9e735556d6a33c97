//! Suggestion port - Interface to the recipe-suggestion provider

use async_trait::async_trait;
use domain::{Recipe, SuggestionRequest};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the generative-text provider that proposes recipes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SuggestionPort: Send + Sync {
    /// Request recipe suggestions for one submission
    ///
    /// Returns the provider's list in relevance order. An empty list is a
    /// valid answer; transport failures and schema mismatches are errors.
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Recipe>, ApplicationError>;

    /// Check if the provider is reachable
    async fn is_healthy(&self) -> bool;

    /// Name of the model answering suggestion requests
    fn model_name(&self) -> String;
}
