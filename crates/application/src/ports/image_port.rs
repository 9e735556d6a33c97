//! Image port - Interface to the recipe-illustration provider

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the generative-image provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImagePort: Send + Sync {
    /// Generate an illustration for a recipe title
    ///
    /// Returns a remote URL or an inline `data:` URI. An empty string means
    /// the provider produced no image.
    async fn generate_image(&self, title: &str) -> Result<String, ApplicationError>;
}
