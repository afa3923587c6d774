pub mod store;
pub mod types;

pub use store::TranscriptStore;
pub use types::{Message, Sender};
