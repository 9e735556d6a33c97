//! Tool frequency store port - Key-value persistence for tool usage counts

use async_trait::async_trait;
use domain::ToolFrequencyMap;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Client-local key-value store holding one JSON tool-frequency map per key
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ToolFrequencyStore: Send + Sync {
    /// Read the map stored under `key`
    ///
    /// A missing key or a malformed payload yields an empty map. Errors are
    /// reserved for the store itself being unusable.
    async fn read(&self, key: &str) -> Result<ToolFrequencyMap, ApplicationError>;

    /// Replace the map stored under `key`
    async fn write(&self, key: &str, map: &ToolFrequencyMap) -> Result<(), ApplicationError>;
}
