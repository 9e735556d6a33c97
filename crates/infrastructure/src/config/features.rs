//! Recipe feature configuration: images, tool selection, voice input.

use std::path::PathBuf;

use application::{DEFAULT_STORAGE_KEY, RecognitionOptions, ToolSelectorMode};
use domain::{DomainError, PLACEHOLDER_IMAGE_URL, PredefinedToolSet};
use serde::{Deserialize, Serialize};

/// Recipe illustration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Image shown until, or instead of, a generated one
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Per-image timeout in milliseconds
    #[serde(default = "default_image_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_placeholder_url() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

const fn default_image_timeout_ms() -> u64 {
    60000
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            placeholder_url: default_placeholder_url(),
            timeout_ms: default_image_timeout_ms(),
        }
    }
}

/// Cooking tool selection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// `freeform` or `predefined-ranked`
    #[serde(default)]
    pub mode: ToolSelectorMode,

    /// Predefined vocabulary (empty = built-in list)
    #[serde(default)]
    pub vocabulary: Vec<String>,

    /// JSON file holding the usage counters
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Key of the counters inside the store
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/tool-frequency.json")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mode: ToolSelectorMode::default(),
            vocabulary: Vec::new(),
            store_path: default_store_path(),
            storage_key: default_storage_key(),
        }
    }
}

impl ToolsConfig {
    /// Configured vocabulary, or the built-in one when none is set
    pub fn predefined_tools(&self) -> Result<PredefinedToolSet, DomainError> {
        if self.vocabulary.is_empty() {
            Ok(PredefinedToolSet::default())
        } else {
            PredefinedToolSet::new(&self.vocabulary)
        }
    }
}

/// Speech recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// BCP 47 recognition language
    #[serde(default = "default_language")]
    pub language: String,

    /// Keep listening and overwrite the field with the running transcript
    #[serde(default)]
    pub continuous: bool,

    /// Deliver partial transcripts
    #[serde(default)]
    pub interim_results: bool,
}

fn default_language() -> String {
    "id-ID".to_string()
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            continuous: false,
            interim_results: false,
        }
    }
}

impl VoiceConfig {
    pub fn recognition_options(&self) -> RecognitionOptions {
        RecognitionOptions {
            language: self.language.clone(),
            continuous: self.continuous,
            interim_results: self.interim_results,
        }
    }
}
