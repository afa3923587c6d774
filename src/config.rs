//! Configuration for the generative-text service and speech I/O
//!
//! Credentials are always injected at startup (environment or host
//! application), never embedded in code.

use crate::speech::synthesis::VoiceGender;
use crate::{CakapError, Result};
use serde::{Deserialize, Serialize};

/// Default Gemini-style API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default speech locale (recognition and synthesis)
pub const DEFAULT_LOCALE: &str = "id-ID";

/// Configuration for the hosted generative-text service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// API credential, injected at startup
    pub api_key: String,

    /// Base URL of the API
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Maximum tokens in a generated reply
    pub max_output_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: 4096,
            temperature: 1.0,
        }
    }
}

impl ServiceConfig {
    /// Create a config with the given credential and default endpoint/model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL (useful for pointing tests at a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Configuration for voice input and output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// BCP-47 locale used for both recognition and synthesis
    pub locale: String,

    /// Preferred synthesis voice gender; `None` accepts any voice
    /// matching the locale
    pub preferred_gender: Option<VoiceGender>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            preferred_gender: Some(VoiceGender::Female),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// `GEMINI_API_KEY` is required; `GEMINI_MODEL` and `CAKAP_LOCALE`
    /// override the defaults when set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| CakapError::Config("GEMINI_API_KEY is not set".to_string()))?;

        let mut config = Self::default();
        config.service.api_key = api_key;

        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.service.model = model;
        }
        if let Ok(locale) = std::env::var("CAKAP_LOCALE") {
            config.speech.locale = locale;
        }

        Ok(config)
    }
}
