//! The chat-completion capability contract

use async_trait::async_trait;

use crate::error::Error;
use crate::request::{ChatCompletion, ChatMessage, ChatRequestSettings};
use crate::stream::CompletionStream;

/// Capability implemented by every concrete chat
/// connector. Callers depend on this trait, never on a
/// provider type.
///
/// Both operations are async and safe to invoke
/// concurrently on one instance; no ordering is promised
/// between independent in-flight requests. Neither
/// operation mutates the caller's message sequence.
#[async_trait]
pub trait ChatBackend: Send + Sync
{   /// Produce a completion for a non-empty ordered
    /// message sequence.
    ///
    /// Returns one string, or an ordered list of
    /// alternatives when the settings ask for several.
    /// Fails with a Backend-kind error when the provider
    /// rejects the request, or a Transport-kind error on
    /// network failure. Retry is the caller's business.
    async fn complete_chat(
      &self
    , messages: &[ChatMessage]
    , settings: &ChatRequestSettings
    ) -> Result<ChatCompletion, Error>;

    /// Open a one-shot, forward-only stream of partial
    /// completions for the same inputs.
    ///
    /// Chunks arrive in provider emission order and the
    /// caller pulls at its own pace. Dropping the stream
    /// before exhaustion is the cancellation mechanism:
    /// it releases the underlying transport and raises
    /// no error for the unconsumed remainder. Each call
    /// opens a fresh production; streams never restart.
    async fn complete_chat_stream(
      &self
    , messages: &[ChatMessage]
    , settings: &ChatRequestSettings
    ) -> Result<CompletionStream, Error>;
}

/// Reject an empty message sequence before any provider
/// work happens. Every conforming backend calls this
/// first.
pub fn ensure_messages(
  messages: &[ChatMessage]
) -> Result<(), Error>
{   if messages.is_empty()
    {   return Err(Error::EmptyMessages);
    }
    Ok(())
}
