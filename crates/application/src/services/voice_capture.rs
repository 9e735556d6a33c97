//! Voice capture - Speech-to-text sessions feeding the recipe form

use std::{fmt, sync::Arc};

use domain::messages;
use tracing::{debug, warn};

use super::recipe_form::RecipeForm;
use crate::ports::{RecognitionOptions, SpeechErrorKind, SpeechEvent, SpeechRecognizer};

/// Form field a capture session writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTarget {
    Ingredients,
    Tools,
}

/// Capture controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// No speech capability on this platform; voice input is hidden
    Unavailable,
    Idle,
    Listening(VoiceTarget),
}

/// Transient notification shown after a voice failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceNotice {
    pub title: String,
    pub message: String,
}

impl VoiceNotice {
    fn new(message: &str) -> Self {
        Self {
            title: messages::VOICE_ERROR_TITLE.to_string(),
            message: message.to_string(),
        }
    }

    /// Notice for a recognizer error; aborted sessions are silent
    pub fn from_error(kind: &SpeechErrorKind) -> Option<Self> {
        let message = match kind {
            SpeechErrorKind::NotAllowed | SpeechErrorKind::ServiceNotAllowed => {
                messages::VOICE_PERMISSION_DENIED
            },
            SpeechErrorKind::NoSpeech => messages::VOICE_NO_SPEECH,
            SpeechErrorKind::Aborted => return None,
            SpeechErrorKind::Other(_) => messages::VOICE_GENERIC_ERROR,
        };
        Some(Self::new(message))
    }
}

/// Starts and stops capture sessions and applies their transcripts
pub struct VoiceCapture {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    options: RecognitionOptions,
    state: VoiceState,
}

impl fmt::Debug for VoiceCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCapture")
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl VoiceCapture {
    /// Availability is decided once, here
    pub fn new(recognizer: Option<Arc<dyn SpeechRecognizer>>, options: RecognitionOptions) -> Self {
        let state = if recognizer.is_some() {
            VoiceState::Idle
        } else {
            VoiceState::Unavailable
        };
        Self {
            recognizer,
            options,
            state,
        }
    }

    pub fn unavailable() -> Self {
        Self::new(None, RecognitionOptions::default())
    }

    pub const fn state(&self) -> VoiceState {
        self.state
    }

    pub const fn is_available(&self) -> bool {
        !matches!(self.state, VoiceState::Unavailable)
    }

    pub const fn is_listening(&self) -> bool {
        matches!(self.state, VoiceState::Listening(_))
    }

    pub const fn options(&self) -> &RecognitionOptions {
        &self.options
    }

    /// Start a session for `target`, or stop the running one
    ///
    /// Does nothing when voice input is unavailable.
    pub fn toggle(&mut self, target: VoiceTarget) -> Option<VoiceNotice> {
        let recognizer = self.recognizer.as_ref()?;

        if self.is_listening() {
            recognizer.stop();
            self.state = VoiceState::Idle;
            return None;
        }

        match recognizer.start(&self.options) {
            Ok(()) => {
                debug!(?target, language = %self.options.language, "Voice capture started");
                self.state = VoiceState::Listening(target);
                None
            },
            Err(kind) => {
                warn!(?kind, "Failed to start voice capture");
                self.state = VoiceState::Idle;
                Some(VoiceNotice::new(messages::VOICE_START_FAILED))
            },
        }
    }

    /// Stop the running session, if any
    pub fn stop(&mut self) {
        if let (Some(recognizer), true) = (&self.recognizer, self.is_listening()) {
            recognizer.stop();
            self.state = VoiceState::Idle;
        }
    }

    /// Apply a recognizer event to the form
    ///
    /// Events arriving while no session is active are ignored.
    pub fn handle_event(&mut self, event: SpeechEvent, form: &mut RecipeForm) -> Option<VoiceNotice> {
        let VoiceState::Listening(target) = self.state else {
            return None;
        };

        match event {
            SpeechEvent::Result {
                transcript,
                is_final,
            } => {
                self.apply_transcript(target, transcript.trim(), is_final, form);
                None
            },
            SpeechEvent::Error(kind) => {
                warn!(?kind, "Voice capture failed");
                self.state = VoiceState::Idle;
                VoiceNotice::from_error(&kind)
            },
            SpeechEvent::End => {
                debug!("Voice capture ended");
                self.state = VoiceState::Idle;
                None
            },
        }
    }

    fn apply_transcript(
        &self,
        target: VoiceTarget,
        transcript: &str,
        is_final: bool,
        form: &mut RecipeForm,
    ) {
        match target {
            VoiceTarget::Ingredients if self.options.continuous => {
                form.set_ingredients(transcript);
            },
            VoiceTarget::Ingredients => {
                if is_final {
                    form.append_ingredients(transcript);
                }
            },
            VoiceTarget::Tools => {
                if is_final {
                    let added = form.tools_mut().add_from_transcript(transcript);
                    debug!(added, "Tools added from transcript");
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockSpeechRecognizer;

    fn recognizer() -> Arc<dyn SpeechRecognizer> {
        let mut mock = MockSpeechRecognizer::new();
        mock.expect_start().returning(|_| Ok(()));
        mock.expect_stop().return_const(());
        Arc::new(mock)
    }

    fn final_result(text: &str) -> SpeechEvent {
        SpeechEvent::Result {
            transcript: text.to_string(),
            is_final: true,
        }
    }

    #[test]
    fn missing_capability_is_silent() {
        let mut voice = VoiceCapture::unavailable();
        assert!(!voice.is_available());
        assert_eq!(voice.toggle(VoiceTarget::Ingredients), None);
        assert_eq!(voice.state(), VoiceState::Unavailable);
    }

    #[test]
    fn toggle_starts_and_stops() {
        let mut voice = VoiceCapture::new(Some(recognizer()), RecognitionOptions::default());
        assert_eq!(voice.toggle(VoiceTarget::Tools), None);
        assert_eq!(voice.state(), VoiceState::Listening(VoiceTarget::Tools));
        assert_eq!(voice.toggle(VoiceTarget::Ingredients), None);
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[test]
    fn start_failure_returns_notice() {
        let mut mock = MockSpeechRecognizer::new();
        mock.expect_start()
            .returning(|_| Err(SpeechErrorKind::Other("busy".to_string())));
        let mut voice = VoiceCapture::new(Some(Arc::new(mock)), RecognitionOptions::default());

        let notice = voice.toggle(VoiceTarget::Ingredients).unwrap();
        assert_eq!(notice.message, messages::VOICE_START_FAILED);
        assert_eq!(notice.title, messages::VOICE_ERROR_TITLE);
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[test]
    fn final_transcript_is_appended_to_ingredients() {
        let mut form = RecipeForm::default();
        form.set_ingredients("telur");
        let mut voice = VoiceCapture::new(Some(recognizer()), RecognitionOptions::default());
        voice.toggle(VoiceTarget::Ingredients);

        voice.handle_event(
            SpeechEvent::Result {
                transcript: "nas".to_string(),
                is_final: false,
            },
            &mut form,
        );
        voice.handle_event(final_result(" nasi "), &mut form);
        assert_eq!(form.ingredients(), "telur, nasi");
    }

    #[test]
    fn continuous_mode_overwrites_with_running_transcript() {
        let options = RecognitionOptions {
            continuous: true,
            interim_results: true,
            ..RecognitionOptions::default()
        };
        let mut form = RecipeForm::default();
        form.set_ingredients("lama");
        let mut voice = VoiceCapture::new(Some(recognizer()), options);
        voice.toggle(VoiceTarget::Ingredients);

        voice.handle_event(
            SpeechEvent::Result {
                transcript: "telur".to_string(),
                is_final: false,
            },
            &mut form,
        );
        assert_eq!(form.ingredients(), "telur");
        voice.handle_event(final_result("telur dan nasi"), &mut form);
        assert_eq!(form.ingredients(), "telur dan nasi");
    }

    #[test]
    fn tools_transcript_adds_lowercased_tools() {
        let mut form = RecipeForm::default();
        form.tools_mut().add("panci").unwrap();
        let mut voice = VoiceCapture::new(Some(recognizer()), RecognitionOptions::default());
        voice.toggle(VoiceTarget::Tools);

        voice.handle_event(final_result("Panci, Rice Cooker, wajan"), &mut form);
        assert_eq!(
            form.tools().selection().names(),
            vec!["panci", "rice cooker", "wajan"]
        );
    }

    #[test]
    fn errors_return_to_idle_with_localized_notice() {
        let mut form = RecipeForm::default();
        let mut voice = VoiceCapture::new(Some(recognizer()), RecognitionOptions::default());

        voice.toggle(VoiceTarget::Ingredients);
        let notice = voice
            .handle_event(SpeechEvent::Error(SpeechErrorKind::NotAllowed), &mut form)
            .unwrap();
        assert_eq!(notice.message, messages::VOICE_PERMISSION_DENIED);
        assert_eq!(voice.state(), VoiceState::Idle);

        voice.toggle(VoiceTarget::Ingredients);
        let notice = voice
            .handle_event(SpeechEvent::Error(SpeechErrorKind::NoSpeech), &mut form)
            .unwrap();
        assert_eq!(notice.message, messages::VOICE_NO_SPEECH);

        voice.toggle(VoiceTarget::Ingredients);
        assert_eq!(
            voice.handle_event(SpeechEvent::Error(SpeechErrorKind::Aborted), &mut form),
            None
        );
        assert_eq!(voice.state(), VoiceState::Idle);
    }

    #[test]
    fn end_returns_to_idle_and_later_events_are_ignored() {
        let mut form = RecipeForm::default();
        let mut voice = VoiceCapture::new(Some(recognizer()), RecognitionOptions::default());
        voice.toggle(VoiceTarget::Ingredients);

        voice.handle_event(SpeechEvent::End, &mut form);
        assert_eq!(voice.state(), VoiceState::Idle);

        voice.handle_event(final_result("telur"), &mut form);
        assert_eq!(form.ingredients(), "");
    }
}
