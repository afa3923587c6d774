//! Message submission pipeline
//!
//! One submission runs: validate, append the user message, stream the
//! reply, render it, append the bot message, speak it. All failures are
//! contained here; none cross the session boundary.

use crate::genai::{GenerativeService, Turn};
use crate::markup;
use crate::session::SessionHandle;
use crate::speech::synthesis::VoiceOutput;
use crate::transcript::{Message, TranscriptStore};
use crate::{CakapError, Result};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct ChatPipeline {
    service: Arc<dyn GenerativeService>,
    voice: VoiceOutput,
    transcript: TranscriptStore,
    session: SessionHandle,
}

impl ChatPipeline {
    pub fn new(service: Arc<dyn GenerativeService>, voice: VoiceOutput) -> Self {
        Self {
            service,
            voice,
            transcript: TranscriptStore::new(),
            session: SessionHandle::new(),
        }
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Submit one message, typed or spoken
    ///
    /// Blank input and an already-pending submission are rejected before
    /// any side effect. The loading flag is cleared and the input field
    /// reset on every exit path past those checks.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            let err = CakapError::Validation("empty message".to_string());
            self.session.set_error(err.user_message());
            return Err(err);
        }

        if !self.session.try_begin() {
            let err = CakapError::Busy;
            self.session.set_error(err.user_message());
            return Err(err);
        }

        self.session.clear_error();
        self.transcript.push(Message::user(trimmed));

        let outcome = self.exchange(trimmed).await;
        self.session.finish();

        outcome.map_err(|err| {
            error!(error = %err, "message submission failed");
            self.session.set_error(err.user_message());
            err
        })
    }

    async fn exchange(&self, user_text: &str) -> Result<()> {
        // Each call carries only the current turn; the service sees no
        // prior history.
        let turns = [Turn::user(user_text)];
        let mut stream = self.service.stream_reply(&turns).await?;

        let mut buffer = String::new();
        while let Some(fragment) = stream.next().await {
            buffer.push_str(&fragment?);
        }
        debug!(chars = buffer.len(), "reply stream finished");

        if buffer.is_empty() {
            return Err(CakapError::Service("service returned an empty reply".to_string()));
        }

        let rendered = markup::render_markdown(&buffer);
        self.transcript.push(Message::bot(rendered.clone()));

        // Speaking is a side effect of the committed bot message; its
        // failure is surfaced but never rolls the message back.
        if let Err(err) = self.voice.speak(&markup::strip_markup(&rendered)) {
            warn!(error = %err, "speech synthesis failed");
            self.session.set_error(err.user_message());
        }

        Ok(())
    }
}
