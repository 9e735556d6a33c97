//! Speech port - Interface to a platform speech-to-text capability
//!
//! The capability is optional. When the platform offers none, the caller
//! passes `None` and voice input is hidden.

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Options used when starting a capture session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionOptions {
    /// BCP 47 language tag, e.g. "id-ID"
    pub language: String,
    /// Keep listening across pauses and report a running transcript
    pub continuous: bool,
    /// Report partial results while the user is still speaking
    pub interim_results: bool,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            language: "id-ID".to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// Error kinds reported by the recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechErrorKind {
    /// The user denied microphone access
    NotAllowed,
    /// The platform refused the recognition service
    ServiceNotAllowed,
    /// Nothing was heard before the recognizer gave up
    NoSpeech,
    /// The session was aborted (usually by `stop`)
    Aborted,
    /// Any other recognizer failure
    Other(String),
}

impl SpeechErrorKind {
    /// Parse the error code used by web speech implementations
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" => Self::NotAllowed,
            "service-not-allowed" => Self::ServiceNotAllowed,
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Event emitted by an active capture session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// A transcript; in continuous mode this is the full running transcript
    Result { transcript: String, is_final: bool },
    /// The session failed
    Error(SpeechErrorKind),
    /// The session ended (silence, completion or stop)
    End,
}

/// A speech-to-text capability that can be started and stopped
///
/// Results are delivered out of band as [`SpeechEvent`]s.
#[cfg_attr(test, automock)]
pub trait SpeechRecognizer: Send + Sync {
    /// Begin a capture session
    fn start(&self, options: &RecognitionOptions) -> Result<(), SpeechErrorKind>;

    /// End the current capture session
    fn stop(&self);
}
