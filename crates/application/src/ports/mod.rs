//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod image_port;
mod speech_port;
mod suggestion_port;
mod tool_frequency_store;

pub use image_port::ImagePort;
#[cfg(test)]
pub use image_port::MockImagePort;
#[cfg(test)]
pub use speech_port::MockSpeechRecognizer;
pub use speech_port::{RecognitionOptions, SpeechErrorKind, SpeechEvent, SpeechRecognizer};
#[cfg(test)]
pub use suggestion_port::MockSuggestionPort;
pub use suggestion_port::SuggestionPort;
#[cfg(test)]
pub use tool_frequency_store::MockToolFrequencyStore;
pub use tool_frequency_store::ToolFrequencyStore;
