//! Voice output: speaks the plain-text form of bot replies
//!
//! Voice selection prefers the configured locale and gender; when the
//! engine reports no matching voice (including the empty list some
//! platforms return before their voices finish loading), the utterance
//! goes out without a voice handle and the platform default is used.

use crate::config::SpeechConfig;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceGender {
    Female,
    Male,
}

/// A synthesis voice as reported by the platform engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47 language tag
    pub language: String,
    pub gender: Option<VoiceGender>,
}

/// A unit of speech to enqueue for playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub language: String,
    /// Name of the selected voice; `None` means the platform default
    pub voice: Option<String>,
}

/// Injected speech-synthesis capability
pub trait SpeechSynthesis: Send + Sync {
    /// Currently loaded voices; may be empty until the platform has
    /// finished loading them
    fn voices(&self) -> Vec<Voice>;

    /// Queue an utterance for playback
    fn enqueue(&self, utterance: Utterance) -> Result<()>;
}

pub struct VoiceOutput {
    engine: Arc<dyn SpeechSynthesis>,
    config: SpeechConfig,
}

impl VoiceOutput {
    pub fn new(engine: Arc<dyn SpeechSynthesis>, config: SpeechConfig) -> Self {
        Self { engine, config }
    }

    /// Speak already-stripped plain text in the configured locale
    ///
    /// Empty text is skipped. Failures propagate so the caller can make
    /// them observable; they carry no rollback obligation.
    pub fn speak(&self, plain_text: &str) -> Result<()> {
        let text = plain_text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let voice = self.select_voice();
        if voice.is_none() {
            debug!(locale = %self.config.locale, "no matching voice, using platform default");
        }

        self.engine.enqueue(Utterance {
            text: text.to_string(),
            language: self.config.locale.clone(),
            voice,
        })
    }

    /// First voice matching locale and preferred gender wins
    fn select_voice(&self) -> Option<String> {
        self.engine
            .voices()
            .into_iter()
            .find(|v| {
                v.language == self.config.locale
                    && (self.config.preferred_gender.is_none()
                        || v.gender == self.config.preferred_gender)
            })
            .map(|v| v.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct FakeEngine {
        voices: Vec<Voice>,
        spoken: Mutex<Vec<Utterance>>,
    }

    impl FakeEngine {
        fn with_voices(voices: Vec<Voice>) -> Arc<Self> {
            Arc::new(Self {
                voices,
                spoken: Mutex::new(Vec::new()),
            })
        }
    }

    impl SpeechSynthesis for FakeEngine {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn enqueue(&self, utterance: Utterance) -> Result<()> {
            self.spoken.lock().push(utterance);
            Ok(())
        }
    }

    fn voice(name: &str, language: &str, gender: Option<VoiceGender>) -> Voice {
        Voice {
            name: name.to_string(),
            language: language.to_string(),
            gender,
        }
    }

    #[test]
    fn test_first_matching_voice_wins() {
        let engine = FakeEngine::with_voices(vec![
            voice("id-male", "id-ID", Some(VoiceGender::Male)),
            voice("id-female-a", "id-ID", Some(VoiceGender::Female)),
            voice("id-female-b", "id-ID", Some(VoiceGender::Female)),
        ]);
        let output = VoiceOutput::new(engine.clone(), SpeechConfig::default());

        output.speak("Selamat pagi").unwrap();

        let spoken = engine.spoken.lock();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].voice.as_deref(), Some("id-female-a"));
        assert_eq!(spoken[0].language, "id-ID");
    }

    #[test]
    fn test_platform_default_when_nothing_matches() {
        let engine =
            FakeEngine::with_voices(vec![voice("en-female", "en-US", Some(VoiceGender::Female))]);
        let output = VoiceOutput::new(engine.clone(), SpeechConfig::default());

        output.speak("Selamat pagi").unwrap();
        assert_eq!(engine.spoken.lock()[0].voice, None);
    }

    #[test]
    fn test_platform_default_when_voices_not_loaded_yet() {
        let engine = FakeEngine::with_voices(Vec::new());
        let output = VoiceOutput::new(engine.clone(), SpeechConfig::default());

        output.speak("Selamat pagi").unwrap();
        assert_eq!(engine.spoken.lock()[0].voice, None);
    }

    #[test]
    fn test_any_gender_accepted_without_preference() {
        let engine =
            FakeEngine::with_voices(vec![voice("id-male", "id-ID", Some(VoiceGender::Male))]);
        let config = SpeechConfig {
            preferred_gender: None,
            ..Default::default()
        };
        let output = VoiceOutput::new(engine.clone(), config);

        output.speak("Selamat pagi").unwrap();
        assert_eq!(engine.spoken.lock()[0].voice.as_deref(), Some("id-male"));
    }

    #[test]
    fn test_empty_text_not_enqueued() {
        let engine = FakeEngine::with_voices(Vec::new());
        let output = VoiceOutput::new(engine.clone(), SpeechConfig::default());

        output.speak("   ").unwrap();
        assert!(engine.spoken.lock().is_empty());
    }
}
