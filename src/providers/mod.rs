//! Chat connector implementations
//!
//! Both connectors speak the OpenAI chat-completions
//! wire format; the shared request/response shapes, the
//! SSE scanner and the status mapping live here, while
//! each provider module owns its transport details
//! (URL scheme, auth headers).

pub mod azure;
pub mod openai;

// Re-export for convenience
pub use azure::AzureChatCompletion;
pub use openai::OpenAiChatCompletion;

use futures::StreamExt;
use log::{debug, error, trace};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::request::{ChatCompletion, ChatMessage, ChatRequestSettings};
use crate::stream::{ChunkResult, CompletionStream};

// ===== Wire Types =====

/// Request body for the chat completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatApiRequest
{   /// Model name; absent for Azure, where the
    /// deployment is part of the URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>
}

/// Map unified messages and settings onto the wire
pub fn build_request(
  model: Option<String>
, messages: &[ChatMessage]
, settings: &ChatRequestSettings
, stream: bool
) -> ChatApiRequest
{   ChatApiRequest
    {   model
      , messages: messages.to_vec()
      , temperature: settings.temperature
      , top_p: settings.top_p
      , max_tokens: settings.max_tokens
      , stop: settings.stop_sequences.clone()
      , n: settings.number_of_responses
      , presence_penalty: settings.presence_penalty
      , frequency_penalty: settings.frequency_penalty
      , stream: if stream { Some(true) } else { None }
    }
}

/// Response body for a non-streamed request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatApiResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub index: Option<usize>
  , pub message: ResponseMessage
  , pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage
{   #[serde(default)]
    pub role: Option<String>
  , #[serde(default)]
    pub content: Option<String>
}

/// One SSE payload of a streamed request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunk
{   #[serde(default)]
    pub choices: Vec<ChunkChoice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice
{   #[serde(default)]
    pub index: usize
  , pub delta: ChunkDelta
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkDelta
{   #[serde(default)]
    pub role: Option<String>
  , #[serde(default)]
    pub content: Option<String>
}

// ===== Wire -> Unified =====

/// Turn a parsed response into a completion.
/// One choice gives Single, several give Alternatives
/// in choice order, none is a backend error.
pub fn completion_from_response(
  response: ChatApiResponse
) -> Result<ChatCompletion, Error>
{   let mut texts: Vec<String> = response.choices
      .into_iter()
      .map(|c| c.message.content.unwrap_or_default())
      .collect();

    match texts.len()
    {   0 => {
          error!("No choices in response");
          Err(Error::NoChoicesInResponse)
        }
      , 1 => Ok(ChatCompletion::Single(texts.remove(0)))
      , _ => Ok(ChatCompletion::Alternatives(texts))
    }
}

/// Turn one SSE payload into a partial completion.
/// Role-only and empty payloads produce None. With
/// several responses requested, deltas land at their
/// choice index and absent choices stay empty.
pub fn completion_from_chunk(
  chunk: ChatChunk
, response_count: usize
) -> Option<ChatCompletion>
{   if response_count <= 1
    {   let text = chunk.choices
          .into_iter()
          .filter_map(|c| c.delta.content)
          .collect::<String>();
        if text.is_empty()
        {   return None;
        }
        return Some(ChatCompletion::Single(text));
    }

    let mut texts = vec![String::new(); response_count];
    let mut any = false;
    for choice in chunk.choices
    {   if let Some(content) = choice.delta.content
        {   if content.is_empty()
            {   continue;
            }
            let slot = choice.index.min(response_count - 1);
            texts[slot].push_str(&content);
            any = true;
        }
    }

    if any
    {   Some(ChatCompletion::Alternatives(texts))
    } else
    {   None
    }
}

// ===== Error Mapping =====

/// Map a rejected HTTP status onto the error boundary
pub fn status_to_error(
  status: reqwest::StatusCode
, body: String
) -> Error
{   match status.as_u16()
    {   401 | 403 => Error::InvalidCredentials(body)
      , 429 => Error::QuotaExceeded
      , 400 => Error::InvalidSettings(body)
      , _ => Error::ApiError(
          format!("{}: {}", status, body)
        )
    }
}

/// Map a reqwest failure onto the transport side
pub fn http_error(e: reqwest::Error) -> Error
{   if e.is_timeout()
    {   Error::Timeout
    } else
    {   Error::HttpError(e.to_string())
    }
}

// ===== SSE Scanning =====

/// Accumulates raw bytes and hands back complete
/// `data:` payloads one line at a time
#[derive(Debug, Default)]
pub struct SseBuffer
{   buffer: String
}

impl SseBuffer
{   pub fn new() -> Self
    {   SseBuffer::default()
    }

    /// Append a raw chunk from the byte stream
    pub fn push(&mut self, bytes: &[u8])
    {   self.buffer
          .push_str(&String::from_utf8_lossy(bytes));
    }

    /// Next complete `data:` payload, if a full line is
    /// buffered. Blank and `event:` lines are skipped.
    pub fn next_data(&mut self) -> Option<String>
    {   while let Some(newline_pos) = self.buffer.find('\n')
        {   let line = self.buffer[..newline_pos]
              .trim()
              .to_string();
            self.buffer = self.buffer[newline_pos + 1..]
              .to_string();

            if line.is_empty()
              || line.starts_with("event:")
            {   continue;
            }

            if let Some(data) = line.strip_prefix("data: ")
            {   return Some(data.to_string());
            }
        }
        None
    }
}

// ===== Shared Transport Paths =====

/// Send a fully built request and map the response
pub(crate) async fn execute_chat(
  request: reqwest::RequestBuilder
) -> Result<ChatCompletion, Error>
{   let response = request.send().await.map_err(|e| {
      error!("HTTP error: {}", e);
      http_error(e)
    })?;

    let status = response.status();
    trace!("Chat response status: {}", status);

    if !status.is_success()
    {   let error_text = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        error!("Chat API error: {}", error_text);
        return Err(status_to_error(status, error_text));
    }

    let chat_response: ChatApiResponse
      = response.json().await.map_err(|e| {
        error!("Parse error: {}", e);
        Error::ParseError(e.to_string())
      })?;

    completion_from_response(chat_response)
}

/// Send a fully built streaming request and hand the
/// open response to a producer task
pub(crate) async fn open_stream(
  request: reqwest::RequestBuilder
, response_count: usize
) -> Result<CompletionStream, Error>
{   let response = request.send().await.map_err(|e| {
      error!("HTTP error: {}", e);
      http_error(e)
    })?;

    let status = response.status();
    trace!("Stream response status: {}", status);

    if !status.is_success()
    {   let error_text = response.text().await
          .unwrap_or_else(|_|
            "Unknown error".to_string()
          );
        error!("Chat API error: {}", error_text);
        return Err(status_to_error(status, error_text));
    }

    Ok(CompletionStream::spawn(move |tx| {
      pump_sse(response, response_count, tx)
    }))
}

/// Producer loop: read the SSE body, convert payloads,
/// push chunks until `[DONE]`, end of body, failure, or
/// a dropped consumer
async fn pump_sse(
  response: reqwest::Response
, response_count: usize
, tx: tokio::sync::mpsc::Sender<ChunkResult>
)
{   debug!("Starting SSE pump");
    let mut byte_stream = response.bytes_stream();
    let mut buffer = SseBuffer::new();

    while let Some(chunk) = byte_stream.next().await
    {   let bytes = match chunk
        {   Ok(bytes) => bytes
          , Err(e) => {
              error!("Stream transport error: {}", e);
              let _ = tx.send(Err(
                Error::StreamInterrupted(e.to_string())
              )).await;
              return;
            }
        };
        buffer.push(&bytes);

        while let Some(data) = buffer.next_data()
        {   if data == "[DONE]"
            {   debug!("Provider signalled completion");
                return;
            }

            match serde_json::from_str::<ChatChunk>(&data)
            {   Ok(parsed) => {
                  if let Some(completion)
                    = completion_from_chunk(
                        parsed,
                        response_count
                      )
                  {   if tx.send(Ok(completion))
                        .await
                        .is_err()
                      {   debug!("Consumer gone, stopping pump");
                          return;
                      }
                  }
                }
              , Err(e) => {
                  trace!(
                    "Skipping unparsed payload: {} - {}",
                    e, data
                  );
                }
            }
        }
    }

    debug!("SSE body exhausted");
}
