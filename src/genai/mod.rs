//! Generative-text service interface
//!
//! The hosted API is reached through the [`GenerativeService`] trait so
//! tests can substitute a scripted double for the real client.

pub mod gemini;

pub use gemini::GeminiClient;

use crate::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Role of a conversation turn, in the service's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One role-tagged turn of conversational context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A lazy, finite, non-restartable sequence of reply fragments
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Open a streaming reply for the given turns
    ///
    /// Fragments arrive in order; transport and decode failures surface
    /// as stream items so the consumer sees them mid-reply.
    async fn stream_reply(&self, turns: &[Turn]) -> Result<ReplyStream>;
}
