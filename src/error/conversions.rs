//! Type Conversions for LlmError
//!
//! `From` implementations for the error types the HTTP and JSON layers produce.

use super::types::LlmError;

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for LlmError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::ConfigurationError(format!("Invalid header value: {err}"))
    }
}

impl From<reqwest::header::InvalidHeaderName> for LlmError {
    fn from(err: reqwest::header::InvalidHeaderName) -> Self {
        Self::ConfigurationError(format!("Invalid header name: {err}"))
    }
}
