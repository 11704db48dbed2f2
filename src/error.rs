use std::fmt;

/// Which side of the capability boundary an error
/// belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{   /// Provider-side rejection (credentials, quota,
    /// bad settings, malformed payload)
    Backend
  , /// Connectivity failure between us and the provider
    Transport
}

/// Custom error type for anychat operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is missing for a backend
    MissingApiKey(String)
  , /// Provider rejected the credentials
    InvalidCredentials(String)
  , /// Provider rejected the request settings
    InvalidSettings(String)
  , /// Quota or rate limit exceeded at the provider
    QuotaExceeded
  , /// Called with an empty message sequence
    EmptyMessages
  , /// API returned an error response
    ApiError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// Failed to parse API response
    ParseError(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// HTTP request error
    HttpError(String)
  , /// Stream died before the provider signalled
    /// completion
    StreamInterrupted(String)
  , /// Timeout error
    Timeout
  , /// Generic error
    Other(String)
}

impl Error
{   /// Classify this error as provider-side or
    /// transport-side
    pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::MissingApiKey(_) => ErrorKind::Backend
          , Error::InvalidCredentials(_) => ErrorKind::Backend
          , Error::InvalidSettings(_) => ErrorKind::Backend
          , Error::QuotaExceeded => ErrorKind::Backend
          , Error::EmptyMessages => ErrorKind::Backend
          , Error::ApiError(_) => ErrorKind::Backend
          , Error::NoChoicesInResponse => ErrorKind::Backend
          , Error::ParseError(_) => ErrorKind::Backend
          , Error::InvalidConfiguration(_) => ErrorKind::Backend
          , Error::HttpError(_) => ErrorKind::Transport
          , Error::StreamInterrupted(_) => ErrorKind::Transport
          , Error::Timeout => ErrorKind::Transport
          , Error::Other(_) => ErrorKind::Backend
        }
    }

    /// True for provider-side rejections
    pub fn is_backend(&self) -> bool
    {   self.kind() == ErrorKind::Backend
    }

    /// True for connectivity failures
    pub fn is_transport(&self) -> bool
    {   self.kind() == ErrorKind::Transport
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingApiKey(backend) => {
              write!(f, "Missing API key for: {}", backend)
            }
          , Error::InvalidCredentials(msg) => {
              write!(f,
                "Provider rejected credentials: {}",
                msg
              )
            }
          , Error::InvalidSettings(msg) => {
              write!(f,
                "Provider rejected settings: {}",
                msg
              )
            }
          , Error::QuotaExceeded => {
              write!(f, "Provider quota or rate limit exceeded")
            }
          , Error::EmptyMessages => {
              write!(f, "Message sequence is empty")
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::StreamInterrupted(msg) => {
              write!(f, "Stream interrupted: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
