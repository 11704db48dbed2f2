//! Unified chat request and completion types

use serde::{Deserialize, Serialize};

/// Role of one conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq,
  Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
  , Function
}

/// A single turn of conversational context.
/// Immutable once constructed; an ordered Vec of these
/// is the full context for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   /// Who produced this turn
    pub role: Role
  , /// The turn's text
    pub content: String
}

impl ChatMessage
{   /// Build a message with an explicit role
    pub fn new(
      role: Role
    , content: impl Into<String>
    ) -> Self
    {   ChatMessage
        {   role
          , content: content.into()
        }
    }

    /// System-role message
    pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage::new(Role::System, content)
    }

    /// User-role message
    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage::new(Role::User, content)
    }

    /// Assistant-role message
    pub fn assistant(content: impl Into<String>) -> Self
    {   ChatMessage::new(Role::Assistant, content)
    }

    /// Function-role message
    pub fn function(content: impl Into<String>) -> Self
    {   ChatMessage::new(Role::Function, content)
    }
}

/// Settings for one completion request.
/// Passed through to the backend unmodified; absent
/// fields are left to provider defaults.
#[derive(Debug, Clone, PartialEq, Default,
  Serialize, Deserialize)]
pub struct ChatRequestSettings
{   /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , /// Nucleus sampling cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>
  , /// Max tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>
  , /// Sequences that stop generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>
  , /// How many alternative completions to request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_responses: Option<usize>
  , /// Presence penalty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>
  , /// Frequency penalty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>
}

impl ChatRequestSettings
{   /// How many completions this request asks for
    pub fn response_count(&self) -> usize
    {   self.number_of_responses.unwrap_or(1).max(1)
    }
}

/// What a backend produced: one string, or an ordered
/// list of alternatives when several were requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChatCompletion
{   /// A single completion
    Single(String)
  , /// Alternative completions, in choice order
    Alternatives(Vec<String>)
}

impl ChatCompletion
{   /// The first (or only) completion text
    pub fn first(&self) -> &str
    {   match self
        {   ChatCompletion::Single(text) => text
          , ChatCompletion::Alternatives(texts) => {
              texts.first().map(String::as_str).unwrap_or("")
            }
        }
    }

    /// All completion texts, in order
    pub fn into_texts(self) -> Vec<String>
    {   match self
        {   ChatCompletion::Single(text) => vec![text]
          , ChatCompletion::Alternatives(texts) => texts
        }
    }
}
