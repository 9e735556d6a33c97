//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the Gemini-backed
//! suggestion and image providers and the tool-frequency stores. Also owns
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ImagesConfig, LogFormat, LoggingConfig, ServerConfig, ToolsConfig, VoiceConfig};
pub use persistence::{InMemoryToolFrequencyStore, JsonFileToolFrequencyStore};
pub use telemetry::{TelemetryError, init_logging};
