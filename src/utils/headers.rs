//! HTTP header helpers.

use crate::error::LlmError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// HTTP header builder for API requests
#[derive(Debug, Default)]
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a header; later calls override earlier ones with the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, LlmError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            LlmError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        let mut header_value = HeaderValue::from_str(value)
            .map_err(|e| LlmError::ConfigurationError(format!("Invalid header value: {e}")))?;
        if name.eq_ignore_ascii_case("api-key") {
            header_value.set_sensitive(true);
        }
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, LlmError> {
        for (key, value) in custom_headers {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

/// Flatten response headers into a plain map for pass-through.
///
/// Non-UTF-8 values are dropped.
pub fn header_map_to_hash_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}
