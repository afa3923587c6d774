//! Voice input: single-shot speech capture feeding the pipeline
//!
//! A recognized transcript is submitted exactly as if the user had typed
//! it. The capture task is aborted on teardown so no late result lands
//! on a dismissed component.

use crate::pipeline::ChatPipeline;
use crate::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::{debug, error, warn};

/// Injected speech-recognition capability
#[async_trait]
pub trait SpeechRecognition: Send + Sync {
    /// Capture one utterance in the given language and resolve with the
    /// top transcript candidate
    async fn recognize_once(&self, language: &str) -> Result<String>;
}

pub struct VoiceInput {
    engine: Arc<dyn SpeechRecognition>,
    pipeline: Arc<ChatPipeline>,
    locale: String,
    capture: Mutex<Option<AbortHandle>>,
}

impl VoiceInput {
    pub fn new(
        engine: Arc<dyn SpeechRecognition>,
        pipeline: Arc<ChatPipeline>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            pipeline,
            locale: locale.into(),
            capture: Mutex::new(None),
        }
    }

    /// Start a single-shot capture session
    ///
    /// At most one capture runs at a time; a second call while one is
    /// active is ignored. Recognition failures are logged and surfaced
    /// on the session error banner.
    pub fn start_listening(&self) {
        let mut slot = self.capture.lock();
        if let Some(handle) = slot.as_ref() {
            if !handle.is_finished() {
                debug!("capture already active, ignoring");
                return;
            }
        }

        let engine = Arc::clone(&self.engine);
        let pipeline = Arc::clone(&self.pipeline);
        let locale = self.locale.clone();

        let task = tokio::spawn(async move {
            debug!(%locale, "listening");
            match engine.recognize_once(&locale).await {
                Ok(transcript) => {
                    if let Err(e) = pipeline.send_message(&transcript).await {
                        warn!(error = %e, "voice submission failed");
                    }
                }
                Err(e) => {
                    error!(error = %e, "speech recognition failed");
                    pipeline.session().set_error(e.user_message());
                }
            }
        });

        *slot = Some(task.abort_handle());
    }

    /// Abort any in-flight capture
    pub fn abort(&self) {
        if let Some(handle) = self.capture.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for VoiceInput {
    fn drop(&mut self) {
        self.abort();
    }
}
