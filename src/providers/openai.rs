//! OpenAI platform chat connector

use async_trait::async_trait;
use log::{debug, trace};

use crate::backend::{ensure_messages, ChatBackend};
use crate::config::OpenAiConfig;
use crate::error::Error;
use crate::request::{ChatCompletion, ChatMessage, ChatRequestSettings};
use crate::stream::CompletionStream;

use super::{build_request, execute_chat, open_stream};

const OPENAI_API_BASE: &str
  = "https://api.openai.com/v1";

/// Chat connector for the OpenAI platform API.
/// Same wire format as the Azure connector, bearer auth
/// and a model name in the body instead.
pub struct OpenAiChatCompletion
{   config: OpenAiConfig
  , http_client: reqwest::Client
}

impl OpenAiChatCompletion
{   /// Build a connector for one model
    pub fn new(config: OpenAiConfig)
      -> Result<Self, Error>
    {   debug!(
          "Creating OpenAiChatCompletion for model: {}",
          config.model
        );
        if config.api_key.is_empty()
        {   return Err(Error::MissingApiKey(
              format!("OpenAI:{}", config.model)
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(
              std::time::Duration::from_secs(secs)
            );
        }
        let http_client = builder.build().map_err(|e| {
          Error::InvalidConfiguration(e.to_string())
        })?;

        Ok(OpenAiChatCompletion
        {   config
          , http_client
        })
    }

    /// Build a connector from the environment
    pub fn from_env(
      model: impl Into<String>
    ) -> Result<Self, Error>
    {   OpenAiChatCompletion::new(
          OpenAiConfig::from_env(model)?
        )
    }

    fn chat_url(&self) -> String
    {   let base = self.config.api_base
          .as_deref()
          .unwrap_or(OPENAI_API_BASE);
        format!(
          "{}/chat/completions",
          base.trim_end_matches('/')
        )
    }

    fn post_chat(
      &self
    , messages: &[ChatMessage]
    , settings: &ChatRequestSettings
    , stream: bool
    ) -> reqwest::RequestBuilder
    {   let request = build_request(
          Some(self.config.model.clone()),
          messages,
          settings,
          stream
        );
        trace!("OpenAI request: {:?}", request);
        self.http_client
          .post(self.chat_url())
          .header(
            "Authorization",
            format!("Bearer {}", self.config.api_key)
          )
          .header("Content-Type", "application/json")
          .json(&request)
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatCompletion
{   async fn complete_chat(
      &self
    , messages: &[ChatMessage]
    , settings: &ChatRequestSettings
    ) -> Result<ChatCompletion, Error>
    {   debug!(
          "complete_chat with {} messages",
          messages.len()
        );
        ensure_messages(messages)?;
        execute_chat(
          self.post_chat(messages, settings, false)
        ).await
    }

    async fn complete_chat_stream(
      &self
    , messages: &[ChatMessage]
    , settings: &ChatRequestSettings
    ) -> Result<CompletionStream, Error>
    {   debug!(
          "complete_chat_stream with {} messages",
          messages.len()
        );
        ensure_messages(messages)?;
        open_stream(
          self.post_chat(messages, settings, true),
          settings.response_count()
        ).await
    }
}
