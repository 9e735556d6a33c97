//! JSON file tool frequency store
//!
//! The file holds one JSON object; each key maps to a tool frequency map:
//!
//! ```json
//! { "pirinku.tool-frequency": { "Panci": 3, "Kompor": 1 } }
//! ```

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use application::{ApplicationError, ports::ToolFrequencyStore};
use async_trait::async_trait;
use domain::ToolFrequencyMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::error::{map_io_error, map_json_error};

type Document = BTreeMap<String, serde_json::Value>;

/// File-backed store; writes replace the file atomically
#[derive(Debug)]
pub struct JsonFileToolFrequencyStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileToolFrequencyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document
    ///
    /// A missing, blank or malformed file is an empty document. Only I/O
    /// failures are errors.
    async fn read_document(&self) -> Result<Document, ApplicationError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(map_io_error(&self.path, &e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::new());
        }
        match serde_json::from_slice(&bytes) {
            Ok(document) => Ok(document),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed frequency file");
                Ok(Document::new())
            },
        }
    }

    async fn write_document(&self, document: &Document) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(parent, &e))?;
        }

        let bytes = serde_json::to_vec_pretty(document).map_err(|e| map_json_error(&self.path, &e))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| map_io_error(&tmp, &e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| map_io_error(&self.path, &e))
    }
}

#[async_trait]
impl ToolFrequencyStore for JsonFileToolFrequencyStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read(&self, key: &str) -> Result<ToolFrequencyMap, ApplicationError> {
        let mut document = self.read_document().await?;
        let Some(value) = document.remove(key) else {
            return Ok(ToolFrequencyMap::new());
        };
        match serde_json::from_value(value) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed frequency entry");
                Ok(ToolFrequencyMap::new())
            },
        }
    }

    #[instrument(skip(self, map), fields(path = %self.path.display(), entries = map.len()))]
    async fn write(&self, key: &str, map: &ToolFrequencyMap) -> Result<(), ApplicationError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;

        let value = serde_json::to_value(map).map_err(|e| map_json_error(&self.path, &e))?;
        document.insert(key.to_string(), value);
        self.write_document(&document).await?;

        debug!("Tool frequencies written");
        Ok(())
    }
}
