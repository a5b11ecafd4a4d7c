//! TranscriptStore trait and the history loader.
//!
//! Persistence is best-effort everywhere: a store failure is logged and the
//! in-memory transcript stays authoritative.

use parley_types::chat::ChatMessage;
use parley_types::error::TranscriptError;
use tracing::warn;

/// The managed transcript store consumed by Parley.
pub trait TranscriptStore: Send + Sync {
    /// Persist one message. Returns the stored record (with the store's id
    /// and timestamp).
    fn create_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<ChatMessage, TranscriptError>> + Send;

    /// All persisted messages, in whatever order the store returns them.
    fn list_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, TranscriptError>> + Send;
}

/// Load the persisted conversation history, sorted ascending by creation
/// time regardless of store return order.
///
/// A load failure yields an empty history -- logged, never surfaced.
pub async fn load_history<T: TranscriptStore>(store: &T) -> Vec<ChatMessage> {
    match store.list_messages().await {
        Ok(mut messages) => {
            messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            messages
        }
        Err(err) => {
            warn!(error = %err, "failed to load transcript history");
            Vec::new()
        }
    }
}
