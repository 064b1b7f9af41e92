//! Error handling module
//!
//! Defines error types and handling logic used by every client

use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// Another request on the same client has not completed yet
    #[error("Another request is already in progress")]
    ConcurrentRequest,

    /// Non-success HTTP status without a server-supplied error message
    #[error("HTTP {status_code}: {status_text}")]
    Http {
        status_code: u16,
        status_text: String,
    },

    /// Server explicitly reported an error
    #[error("{message}")]
    Remote { message: String },

    /// Response did not match any recognized shape
    #[error("Invalid response format from server")]
    MalformedResponse,

    /// Place could not be geocoded
    #[error("Geocode failed: {0}")]
    Geocode(String),

    /// HTTP transport error
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure of a named operation, wrapping the original cause
    #[error("{context}: {source}")]
    Operation {
        context: String,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Wrap this error with an operation prefix
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ClientError::Operation {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping operation wrappers
    pub fn root_cause(&self) -> &ClientError {
        match self {
            ClientError::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::ConcurrentRequest => "concurrent_request_error",
            ClientError::Http { .. } => "http_error",
            ClientError::Remote { .. } => "remote_error",
            ClientError::MalformedResponse => "malformed_response_error",
            ClientError::Geocode(_) => "geocode_error",
            ClientError::Transport(_) => "transport_error",
            ClientError::Serialization(_) => "serialization_error",
            ClientError::Operation { source, .. } => source.error_type(),
        }
    }

    /// Whether the same call may succeed if issued again later
    pub fn is_retryable(&self) -> bool {
        match self.root_cause() {
            ClientError::ConcurrentRequest | ClientError::Transport(_) => true,
            ClientError::Http { status_code, .. } => *status_code == 429 || *status_code >= 500,
            _ => false,
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(self.root_cause(), ClientError::ConcurrentRequest)
    }
}

/// Result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Prefix any error with the failing operation's description
    fn operation_context(self, context: &str) -> ClientResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: Into<ClientError>,
{
    fn operation_context(self, context: &str) -> ClientResult<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
