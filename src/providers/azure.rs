//! Azure OpenAI chat connector

use async_trait::async_trait;
use log::{debug, trace};

use crate::backend::{ensure_messages, ChatBackend};
use crate::config::AzureConfig;
use crate::error::Error;
use crate::request::{ChatCompletion, ChatMessage, ChatRequestSettings};
use crate::stream::CompletionStream;

use super::{build_request, execute_chat, open_stream};

/// Chat connector for an Azure-hosted OpenAI
/// deployment. Holds only config and a shareable HTTP
/// client, so one instance serves concurrent calls.
#[derive(Debug)]
pub struct AzureChatCompletion
{   config: AzureConfig
  , http_client: reqwest::Client
}

impl AzureChatCompletion
{   /// Build a connector for one deployment
    pub fn new(config: AzureConfig)
      -> Result<Self, Error>
    {   debug!(
          "Creating AzureChatCompletion for deployment: {}",
          config.deployment
        );
        if config.api_key.is_empty()
        {   return Err(Error::MissingApiKey(
              format!("Azure:{}", config.deployment)
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

        Ok(AzureChatCompletion
        {   config
          , http_client
        })
    }

    /// Build a connector from the environment
    pub fn from_env() -> Result<Self, Error>
    {   AzureChatCompletion::new(AzureConfig::from_env()?)
    }

    fn chat_url(&self) -> String
    {   format!(
          "{}/openai/deployments/{}/chat/completions?api-version={}",
          self.config.endpoint.trim_end_matches('/'),
          self.config.deployment,
          self.config.api_version
        )
    }

    fn post_chat(
      &self
    , messages: &[ChatMessage]
    , settings: &ChatRequestSettings
    , stream: bool
    ) -> reqwest::RequestBuilder
    {   // Azure carries the deployment in the URL, not
        // in the request body
        let request = build_request(
          None,
          messages,
          settings,
          stream
        );
        trace!("Azure request: {:?}", request);
        self.http_client
          .post(self.chat_url())
          .header("api-key", &self.config.api_key)
          .header("Content-Type", "application/json")
          .json(&request)
    }
}

#[async_trait]
impl ChatBackend for AzureChatCompletion
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
