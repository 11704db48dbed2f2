//! Configuration for anychat connectors

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default Azure OpenAI REST api-version
pub const AZURE_API_VERSION: &str = "2023-05-15";

fn env_var(name: &str) -> Result<String, Error>
{   std::env::var(name).map_err(|_| {
      Error::InvalidConfiguration(
        format!("{} not set", name)
      )
    })
}

/// Configuration for an Azure-hosted chat deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureConfig
{   /// Resource endpoint, e.g.
    /// `https://my-resource.openai.azure.com`
    pub endpoint: String
  , /// Deployment name of the chat model
    pub deployment: String
  , /// API key for the resource
    pub api_key: String
  , /// REST api-version to pin
    pub api_version: String
  , /// Request timeout in seconds
    pub timeout_secs: Option<u64>
}

impl AzureConfig
{   /// Build a config with the default api-version
    pub fn new(
      endpoint: impl Into<String>
    , deployment: impl Into<String>
    , api_key: impl Into<String>
    ) -> Self
    {   AzureConfig
        {   endpoint: endpoint.into()
          , deployment: deployment.into()
          , api_key: api_key.into()
          , api_version: AZURE_API_VERSION.to_string()
          , timeout_secs: None
        }
    }

    /// Load deployment, endpoint and key from the
    /// environment: AZURE_OPENAI_ENDPOINT,
    /// AZURE_OPENAI_DEPLOYMENT, AZURE_OPENAI_API_KEY
    pub fn from_env() -> Result<Self, Error>
    {   Ok(AzureConfig::new(
          env_var("AZURE_OPENAI_ENDPOINT")?
        , env_var("AZURE_OPENAI_DEPLOYMENT")?
        , env_var("AZURE_OPENAI_API_KEY")?
        ))
    }
}

/// Configuration for the OpenAI platform API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig
{   /// API base URL (if custom)
    pub api_base: Option<String>
  , /// API key
    pub api_key: String
  , /// Model name, e.g. `gpt-4`
    pub model: String
  , /// Request timeout in seconds
    pub timeout_secs: Option<u64>
}

impl OpenAiConfig
{   /// Build a config for the given model
    pub fn new(
      api_key: impl Into<String>
    , model: impl Into<String>
    ) -> Self
    {   OpenAiConfig
        {   api_base: None
          , api_key: api_key.into()
          , model: model.into()
          , timeout_secs: None
        }
    }

    /// Load the key from OPENAI_API_KEY
    pub fn from_env(
      model: impl Into<String>
    ) -> Result<Self, Error>
    {   Ok(OpenAiConfig::new(
          env_var("OPENAI_API_KEY")?
        , model
        ))
    }
}
