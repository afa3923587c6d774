pub mod config;
pub mod genai;
pub mod markup;
pub mod pipeline;
pub mod session;
pub mod speech;
pub mod transcript;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CakapError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("A submission is already in flight")]
    Busy,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CakapError {
    fn from(e: reqwest::Error) -> Self {
        CakapError::Service(e.to_string())
    }
}

impl CakapError {
    /// Get the user-facing banner text for this error
    pub fn user_message(&self) -> &'static str {
        match self {
            CakapError::Validation(_) => "Enter a message before sending.",
            CakapError::Service(_) => {
                "Something went wrong while sending the message. Please try again."
            }
            CakapError::Recognition(_) => "Speech recognition failed. Please try again.",
            CakapError::Synthesis(_) => "Text-to-speech failed. The response is shown as text.",
            CakapError::Busy => "A response is still being generated. Please wait.",
            CakapError::Config(_) => "Configuration error. Please check settings.",
        }
    }
}

pub type Result<T> = std::result::Result<T, CakapError>;
