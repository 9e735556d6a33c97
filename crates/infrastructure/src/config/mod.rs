//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `features`: images, cooking tool selection, voice input
//! - `logging`: log filter and output format
//!
//! Inference settings come from [`ai_core::InferenceConfig`].

mod features;
mod logging;
mod server;

use std::path::Path;

use ai_core::InferenceConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use features::{ImagesConfig, ToolsConfig, VoiceConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Prefix of environment variable overrides, e.g. `PIRINKU_SERVER__PORT`
pub const ENV_PREFIX: &str = "PIRINKU";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Generative model API (text and image)
    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file, or `config.*` when `None`
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., PIRINKU_INFERENCE__TEXT_MODEL)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("tools.vocabulary")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.inference.apply_env_api_key();

        if config.inference.api_key().is_none() {
            warn!("No Gemini API key configured; suggestion and image requests will fail");
        }

        Ok(config)
    }
}
