//! Recipe entity

use serde::{Deserialize, Serialize};

/// Fixed fallback image shown until (or instead of) a generated image
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png";

/// A recipe suggestion as produced by the suggestion provider
///
/// All fields except `image_url` come from the provider. `image_url` starts
/// as the placeholder and is later replaced by the card that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Dish name
    pub title: String,

    /// Short description of the dish
    pub description: String,

    /// Ingredients with quantities, in provider order
    pub ingredients: Vec<String>,

    /// Preparation steps, in order
    pub steps: Vec<String>,

    /// Number of servings (e.g. "2 porsi")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,

    /// Preparation time (e.g. "15 menit")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,

    /// Illustration URL or inline data URI
    #[serde(default = "default_image_url")]
    pub image_url: String,
}

fn default_image_url() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

impl Recipe {
    /// Create a recipe with the default placeholder image
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ingredients,
            steps,
            servings: None,
            prep_time: None,
            image_url: default_image_url(),
        }
    }

    #[must_use]
    pub fn with_servings(mut self, servings: impl Into<String>) -> Self {
        self.servings = Some(servings.into());
        self
    }

    #[must_use]
    pub fn with_prep_time(mut self, prep_time: impl Into<String>) -> Self {
        self.prep_time = Some(prep_time.into());
        self
    }

    /// Replace the image with the given placeholder reference
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.image_url = placeholder.into();
        self
    }

    /// A recipe is usable when it has a title, ingredients and steps
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && self.ingredients.iter().any(|i| !i.trim().is_empty())
            && self.steps.iter().any(|s| !s.trim().is_empty())
    }
}
