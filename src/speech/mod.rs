//! Voice input and output adapters
//!
//! The platform speech engines are injected capabilities behind traits,
//! never ambient singletons, so tests substitute doubles and the host
//! controls their lifecycle.

pub mod recognition;
pub mod synthesis;

pub use recognition::{SpeechRecognition, VoiceInput};
pub use synthesis::{SpeechSynthesis, Utterance, Voice, VoiceGender, VoiceOutput};
