//! Domain-level errors

use thiserror::Error;

use crate::messages;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Ingredient text is shorter than the required minimum
    #[error("Ingredients too short: expected at least {min} characters, got {actual}")]
    IngredientsTooShort { min: usize, actual: usize },

    /// No cooking tool was selected
    #[error("At least one cooking tool is required")]
    NoCookingTools,

    /// A tool name was blank after trimming
    #[error("Invalid cooking tool: {0:?}")]
    InvalidCookingTool(String),

    /// Tool is not part of the predefined vocabulary
    #[error("Unknown predefined tool: {0}")]
    UnknownTool(String),

    /// Generic validation failure
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Localized message suitable for showing next to the offending field
    pub fn user_message(&self) -> String {
        match self {
            Self::IngredientsTooShort { .. } => messages::INGREDIENTS_REQUIRED.to_string(),
            Self::NoCookingTools | Self::InvalidCookingTool(_) => {
                messages::TOOLS_REQUIRED.to_string()
            },
            Self::UnknownTool(name) => format!("Alat masak tidak dikenal: {name}"),
            Self::ValidationError(msg) => msg.clone(),
        }
    }
}
