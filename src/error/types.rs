//! `LlmError` and helpers.

use thiserror::Error;

/// Errors surfaced by the Azure AI chat and embedding models.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// No API key was supplied and the environment fallback was empty.
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Configuration could not be turned into a usable client.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request uses a feature the vendor schema cannot express.
    #[error("Unsupported functionality: {0}")]
    UnsupportedOperation(String),

    /// A request parameter was rejected before anything was sent.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The vendor answered with a non-success status.
    ///
    /// The display message is the vendor's own message.
    #[error("{message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Transport-level failure (connect, send, read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A response body did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The server-sent-event stream broke mid-flight.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The caller's abort signal fired before the call completed.
    #[error("The operation was aborted")]
    Aborted,
}

impl LlmError {
    /// Build an `ApiError`.
    pub fn api(code: u16, message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details,
        }
    }

    /// HTTP status code carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this error came from the caller's abort signal.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// Whether the caller can fix this error by adjusting the request.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation(_))
    }
}
