//! Session UI state: input text, error banner, loading flag
//!
//! The handle is cheap to clone and shared between the pipeline, the
//! voice adapters, and whatever renders the state. The loading flag
//! doubles as the in-flight guard: `try_begin` refuses a second
//! submission while one is pending.

use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
struct SessionState {
    input: String,
    error: Option<String>,
    loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.state.write().input = text.into();
    }

    pub fn input(&self) -> String {
        self.state.read().input.clone()
    }

    /// Set the error banner, replacing any prior one
    pub fn set_error(&self, message: impl Into<String>) {
        self.state.write().error = Some(message.into());
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Atomically mark a submission as in flight
    ///
    /// Returns false when one is already pending; the caller must not
    /// proceed in that case.
    pub fn try_begin(&self) -> bool {
        let mut state = self.state.write();
        if state.loading {
            false
        } else {
            state.loading = true;
            true
        }
    }

    /// End the in-flight submission: loading off, then input cleared
    ///
    /// Runs on both the success and the failure path.
    pub fn finish(&self) {
        let mut state = self.state.write();
        state.loading = false;
        state.input.clear();
    }
}
