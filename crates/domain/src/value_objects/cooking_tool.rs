//! Cooking tool value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A single cooking tool name
///
/// Names are trimmed and never blank. Equality used for de-duplication is
/// case-insensitive, see [`CookingTool::same_as`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CookingTool(String);

impl CookingTool {
    /// Create a tool keeping the given casing (used for predefined vocabulary)
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCookingTool(name.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Create a tool from free-form user entry (trimmed and lower-cased)
    pub fn freeform(input: &str) -> Result<Self, DomainError> {
        Self::new(&input.to_lowercase())
    }

    /// Tool name as displayed and sent to the provider
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another name
    pub fn same_as(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }
}

impl TryFrom<String> for CookingTool {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CookingTool> for String {
    fn from(value: CookingTool) -> Self {
        value.0
    }
}

impl fmt::Display for CookingTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
