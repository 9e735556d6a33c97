//! Tool usage service - Frequency counters behind the predefined tool ranking

use std::{fmt, sync::Arc};

use domain::{CookingTool, PredefinedToolSet, SelectedToolSet, ToolFrequencyMap};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::{error::ApplicationError, ports::ToolFrequencyStore};

/// Storage key holding the JSON-encoded tool frequency map
pub const DEFAULT_STORAGE_KEY: &str = "pirinku.tool-frequency";

/// Reads and updates the persisted tool frequency map
pub struct ToolUsageService {
    store: Arc<dyn ToolFrequencyStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl fmt::Debug for ToolUsageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolUsageService")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl ToolUsageService {
    pub fn new(store: Arc<dyn ToolFrequencyStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn ToolFrequencyStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the stored counters; unreadable state counts as empty
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> ToolFrequencyMap {
        match self.store.read(&self.key).await {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "Failed to read tool frequencies, starting empty");
                ToolFrequencyMap::new()
            },
        }
    }

    /// Vocabulary in display order, most used first
    pub async fn ranked(&self, vocabulary: &PredefinedToolSet) -> Vec<CookingTool> {
        let frequencies = self.load().await;
        vocabulary.ranked(&frequencies)
    }

    /// Count one use of every selected tool
    ///
    /// Re-reads the stored map right before writing so updates made by
    /// another writer since the last load are kept. A failed read aborts
    /// the update; the stored counts are never replaced by a fresh map.
    #[instrument(skip(self, selection), fields(key = %self.key, tools = selection.len()))]
    pub async fn record_submission(
        &self,
        selection: &SelectedToolSet,
    ) -> Result<ToolFrequencyMap, ApplicationError> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.store.read(&self.key).await?;
        map.record(selection);
        self.store.write(&self.key, &map).await?;

        debug!(entries = map.len(), "Tool frequencies updated");
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockToolFrequencyStore;

    fn selection(names: &[&str]) -> SelectedToolSet {
        names
            .iter()
            .map(|n| CookingTool::new(n).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn read_failure_is_empty_map() {
        let mut store = MockToolFrequencyStore::new();
        store
            .expect_read()
            .returning(|_| Err(ApplicationError::Storage("corrupt".to_string())));

        let service = ToolUsageService::new(Arc::new(store));
        assert!(service.load().await.is_empty());
    }

    #[tokio::test]
    async fn record_merges_with_stored_counts() {
        let mut store = MockToolFrequencyStore::new();
        store
            .expect_read()
            .withf(|key| key == DEFAULT_STORAGE_KEY)
            .returning(|_| Ok([("Panci".to_string(), 4)].into_iter().collect()));
        store
            .expect_write()
            .withf(|key, map| {
                key == DEFAULT_STORAGE_KEY && map.count("Panci") == 5 && map.count("Kompor") == 1
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ToolUsageService::new(Arc::new(store));
        let map = service
            .record_submission(&selection(&["Panci", "Kompor"]))
            .await
            .unwrap();
        assert_eq!(map.count("Panci"), 5);
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let mut store = MockToolFrequencyStore::new();
        store.expect_read().returning(|_| Ok(ToolFrequencyMap::new()));
        store
            .expect_write()
            .returning(|_, _| Err(ApplicationError::Storage("disk full".to_string())));

        let service = ToolUsageService::with_key(Arc::new(store), "custom");
        let result = service.record_submission(&selection(&["Oven"])).await;
        assert!(matches!(result, Err(ApplicationError::Storage(_))));
    }

    #[tokio::test]
    async fn read_failure_leaves_stored_counts_untouched() {
        let mut store = MockToolFrequencyStore::new();
        store
            .expect_read()
            .times(1)
            .returning(|_| Err(ApplicationError::Storage("busy".to_string())));
        store.expect_write().never();

        let service = ToolUsageService::new(Arc::new(store));
        let result = service.record_submission(&selection(&["Panci"])).await;
        assert!(matches!(result, Err(ApplicationError::Storage(_))));
    }

    #[tokio::test]
    async fn record_after_failed_read_merges_with_history() {
        let mut store = MockToolFrequencyStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ApplicationError::Storage("busy".to_string())));
        store
            .expect_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok([("Panci".to_string(), 4)].into_iter().collect()));
        store
            .expect_write()
            .withf(|_, map| map.count("Panci") == 5)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ToolUsageService::new(Arc::new(store));
        let panci = selection(&["Panci"]);
        assert!(service.record_submission(&panci).await.is_err());
        let map = service.record_submission(&panci).await.unwrap();
        assert_eq!(map.count("Panci"), 5);
    }

    #[tokio::test]
    async fn ranked_uses_stored_counts() {
        let mut store = MockToolFrequencyStore::new();
        store.expect_read().returning(|_| {
            Ok([("Oven".to_string(), 2), ("Blender".to_string(), 2)]
                .into_iter()
                .collect())
        });

        let service = ToolUsageService::new(Arc::new(store));
        let ranked = service.ranked(&PredefinedToolSet::default()).await;
        let names: Vec<&str> = ranked.iter().map(CookingTool::as_str).collect();
        assert_eq!(&names[..3], &["Oven", "Blender", "Kompor"]);
    }
}
