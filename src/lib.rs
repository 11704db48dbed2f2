//! anychat — one async chat-completion contract, any
//! chat model behind it.
//!
//! The crate defines a single capability,
//! [`ChatBackend`]: hand it an ordered, non-empty
//! sequence of role-attributed [`ChatMessage`]s and a
//! [`ChatRequestSettings`] bundle and it produces a
//! [`ChatCompletion`] (one string, or ordered
//! alternatives) or a lazy [`CompletionStream`] of
//! partial completions. Concrete connectors for Azure
//! OpenAI deployments and the OpenAI platform live in
//! [`providers`]; callers depend on the trait, never on
//! a connector type.
//!
//! Errors split into two kinds at the boundary — see
//! [`ErrorKind`]: provider-side rejections and
//! transport failures. The contract does no retry, no
//! batching and no token accounting; that policy
//! belongs to the caller.
//!
//! ```no_run
//! use anychat::{
//!   AzureChatCompletion, ChatBackend, ChatMessage,
//!   ChatRequestSettings
//! };
//!
//! # async fn run() -> Result<(), anychat::Error> {
//! let backend = AzureChatCompletion::from_env()?;
//! let messages = vec![
//!   ChatMessage::user("I am late because")
//! ];
//! let settings = ChatRequestSettings::default();
//!
//! let reply = backend
//!   .complete_chat(&messages, &settings)
//!   .await?;
//! println!("{}", reply.first());
//!
//! let mut stream = backend
//!   .complete_chat_stream(&messages, &settings)
//!   .await?;
//! while let Some(chunk) = stream.next().await
//! {   print!("{}", chunk?.first());
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod providers;
pub mod request;
pub mod stream;

pub use backend::{ensure_messages, ChatBackend};
pub use config::{AzureConfig, OpenAiConfig};
pub use error::{Error, ErrorKind};
pub use providers::{AzureChatCompletion, OpenAiChatCompletion};
pub use request::{
  ChatCompletion, ChatMessage, ChatRequestSettings, Role
};
pub use stream::{ChunkResult, CompletionStream};
