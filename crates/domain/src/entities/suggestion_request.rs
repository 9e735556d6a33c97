//! Suggestion request entity

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::{
    errors::DomainError,
    value_objects::{Ingredients, SelectedToolSet},
};

/// A validated request for recipe suggestions
///
/// Constructed once per submission and immutable afterwards. Serializes to
/// the provider wire shape `{ "ingredients": "...", "cookingTools": "a, b" }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    ingredients: Ingredients,
    cooking_tools: SelectedToolSet,
}

impl SuggestionRequest {
    /// Build a request; the tool selection must not be empty
    pub fn new(ingredients: Ingredients, cooking_tools: SelectedToolSet) -> Result<Self, DomainError> {
        if cooking_tools.is_empty() {
            return Err(DomainError::NoCookingTools);
        }
        Ok(Self {
            ingredients,
            cooking_tools,
        })
    }

    /// Validate raw form values into a request
    pub fn from_raw(ingredients: &str, cooking_tools: &str) -> Result<Self, DomainError> {
        Self::new(
            Ingredients::parse(ingredients)?,
            SelectedToolSet::from_joined(cooking_tools),
        )
    }

    pub fn ingredients(&self) -> &Ingredients {
        &self.ingredients
    }

    pub fn cooking_tools(&self) -> &SelectedToolSet {
        &self.cooking_tools
    }

    /// Comma-joined tool list as sent to the provider
    pub fn cooking_tools_joined(&self) -> String {
        self.cooking_tools.to_joined()
    }
}

impl Serialize for SuggestionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SuggestionRequest", 2)?;
        state.serialize_field("ingredients", self.ingredients.as_str())?;
        state.serialize_field("cookingTools", &self.cooking_tools_joined())?;
        state.end()
    }
}
