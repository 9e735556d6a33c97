//! Free-text ingredient list value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Validated free-text ingredient list entered by the user
///
/// The text is stored trimmed and must contain at least
/// [`Ingredients::MIN_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ingredients(String);

impl Ingredients {
    /// Minimum number of characters (after trimming)
    pub const MIN_LENGTH: usize = 3;

    /// Parse and validate raw user input
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let actual = trimmed.chars().count();
        if actual < Self::MIN_LENGTH {
            return Err(DomainError::IngredientsTooShort {
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the ingredient text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ingredients {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ingredients> for String {
    fn from(value: Ingredients) -> Self {
        value.0
    }
}

impl AsRef<str> for Ingredients {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ingredients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
