use super::types::Message;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory, append-only transcript for one session
///
/// Clones share the same underlying message list. Nothing is persisted;
/// the transcript lives exactly as long as the session.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn push(&self, message: Message) {
        self.messages.write().push(message);
    }

    /// Snapshot of the full transcript in chronological order
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Sender;

    #[test]
    fn test_push_preserves_insertion_order() {
        let store = TranscriptStore::new();
        store.push(Message::user("Halo"));
        store.push(Message::bot("<p>Selamat pagi</p>"));

        let messages = store.snapshot();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(store.last().unwrap().text, "<p>Selamat pagi</p>");
    }

    #[test]
    fn test_clones_share_messages() {
        let store = TranscriptStore::new();
        let other = store.clone();
        store.push(Message::user("hi"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_clear() {
        let store = TranscriptStore::new();
        store.push(Message::user("hi"));
        store.clear();
        assert!(store.is_empty());
    }
}
