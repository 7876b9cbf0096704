//! Azure error envelope parsing.
//!
//! Azure answers failed calls with `{"error": {"message", "type", "param", "code"}}`.
//! Only `message` is required; `type` is commonly omitted and `code` may be
//! a string or a number.

use serde::Deserialize;

use crate::error::LlmError;

#[derive(Debug, Clone, Deserialize)]
struct AzureErrorEnvelope {
    error: AzureErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct AzureErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    param: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Turn a non-success response body into an [`LlmError::ApiError`].
///
/// Bodies that do not match the envelope fail with [`LlmError::ParseError`].
pub fn parse_azure_error(status: u16, body: &str) -> Result<LlmError, LlmError> {
    let envelope: AzureErrorEnvelope = serde_json::from_str(body).map_err(|e| {
        LlmError::ParseError(format!(
            "Unexpected error response (status {status}): {e}: {}",
            truncate(body, 200)
        ))
    })?;

    let AzureErrorBody {
        message,
        kind,
        param,
        code,
    } = envelope.error;

    let details = serde_json::json!({
        "type": kind,
        "param": param,
        "code": code,
    });

    Ok(LlmError::api(status, message, Some(details)))
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
