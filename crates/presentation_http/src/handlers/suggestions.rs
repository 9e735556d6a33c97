//! Recipe suggestion handler

use application::ApplicationError;
use axum::{Json, extract::State};
use domain::{DomainError, Ingredients, Recipe, SelectedToolSet, SuggestionRequest};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::{Validate, ValidationError};

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Suggestion request body, as the form submits it
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionBody {
    /// Free-text ingredient list
    #[validate(custom(function = "valid_ingredients"))]
    pub ingredients: String,
    /// Comma-joined tool names
    #[validate(custom(function = "valid_cooking_tools"))]
    pub cooking_tools: String,
}

/// Suggestion response body
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Recipe>,
}

pub(crate) fn rule_error(code: &'static str, error: &DomainError) -> ValidationError {
    ValidationError::new(code).with_message(error.user_message().into())
}

fn valid_ingredients(value: &str) -> Result<(), ValidationError> {
    Ingredients::parse(value)
        .map(drop)
        .map_err(|e| rule_error("ingredients", &e))
}

fn valid_cooking_tools(value: &str) -> Result<(), ValidationError> {
    if SelectedToolSet::from_joined(value).is_empty() {
        return Err(rule_error("cooking_tools", &DomainError::NoCookingTools));
    }
    Ok(())
}

/// Ask the text model for recipes
///
/// Every returned recipe carries the placeholder image; clients fetch the
/// real illustration per card through `/v1/images`.
#[instrument(skip(state, body), fields(ingredients_len = body.ingredients.len()))]
pub async fn suggest(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SuggestionBody>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let request = SuggestionRequest::from_raw(&body.ingredients, &body.cooking_tools)
        .map_err(ApplicationError::from)?;

    let suggestions = state
        .suggestions
        .get_suggestions(&request)
        .await
        .map_err(ApiError::suggestion_failed)?;

    info!(recipe_count = suggestions.len(), "Suggestions served");
    Ok(Json(SuggestionsResponse { suggestions }))
}
