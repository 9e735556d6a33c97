//! In-memory tool frequency store

use std::collections::HashMap;

use application::{ApplicationError, ports::ToolFrequencyStore};
use async_trait::async_trait;
use domain::ToolFrequencyMap;
use parking_lot::RwLock;

/// Process-local store; contents are lost on exit
#[derive(Debug, Default)]
pub struct InMemoryToolFrequencyStore {
    entries: RwLock<HashMap<String, ToolFrequencyMap>>,
}

impl InMemoryToolFrequencyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ToolFrequencyStore for InMemoryToolFrequencyStore {
    async fn read(&self, key: &str) -> Result<ToolFrequencyMap, ApplicationError> {
        Ok(self.entries.read().get(key).cloned().unwrap_or_default())
    }

    async fn write(&self, key: &str, map: &ToolFrequencyMap) -> Result<(), ApplicationError> {
        self.entries.write().insert(key.to_string(), map.clone());
        Ok(())
    }
}
