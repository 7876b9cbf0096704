//! Azure AI provider configuration.
//!
//! [`AzureAiProviderSettings`] is what callers build; it is resolved once per
//! model into an [`AzureAiConfig`] with the credential loaded and the
//! endpoint normalized.

use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::error::LlmError;
use crate::utils::headers::HttpHeaderBuilder;

/// Placeholder endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://<resource>.services.ai.azure.com/models";
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

pub const API_KEY_ENV: &str = "AZURE_API_KEY";
pub const ENDPOINT_ENV: &str = "AZURE_API_ENDPOINT";
pub const API_VERSION_ENV: &str = "AZURE_API_VERSION";

/// Provider-level settings shared by every model the provider creates.
#[derive(Clone, Default)]
pub struct AzureAiProviderSettings {
    /// e.g. `https://<resource>.services.ai.azure.com/models`
    pub endpoint: Option<String>,
    /// Falls back to `AZURE_API_KEY` when unset.
    pub api_key: Option<SecretString>,
    /// Defaults to [`DEFAULT_API_VERSION`].
    pub api_version: Option<String>,
    /// Extra headers sent with every request.
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
}

impl std::fmt::Debug for AzureAiProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureAiProviderSettings")
            .field("endpoint", &self.endpoint)
            .field("has_api_key", &self.api_key.is_some())
            .field("api_version", &self.api_version)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}

impl AzureAiProviderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings populated from `AZURE_API_ENDPOINT`, `AZURE_API_KEY` and
    /// `AZURE_API_VERSION`. Unset or empty variables are left as `None`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            endpoint: non_empty(ENDPOINT_ENV),
            api_key: non_empty(API_KEY_ENV).map(SecretString::from),
            api_version: non_empty(API_VERSION_ENV),
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<AzureAiConfig, LlmError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub(crate) fn resolve_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<AzureAiConfig, LlmError> {
        let api_key = match &self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => key.clone(),
            _ => lookup(API_KEY_ENV)
                .filter(|v| !v.trim().is_empty())
                .map(SecretString::from)
                .ok_or_else(|| {
                    LlmError::MissingApiKey(format!(
                        "Azure AI API key is missing. Pass it using the 'api_key' setting or the {API_KEY_ENV} environment variable."
                    ))
                })?,
        };

        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT);

        let config = AzureAiConfig {
            base_url: endpoint.trim_end_matches('/').to_string(),
            api_key,
            api_version: self
                .api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            headers: self.headers.clone(),
            http_client: self.http_client.clone().unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Resolved configuration a model holds for its lifetime.
#[derive(Clone)]
pub struct AzureAiConfig {
    /// Endpoint without trailing slash.
    pub base_url: String,
    pub api_key: SecretString,
    pub api_version: String,
    pub headers: HashMap<String, String>,
    pub http_client: reqwest::Client,
}

impl std::fmt::Debug for AzureAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl AzureAiConfig {
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.base_url.is_empty() {
            return Err(LlmError::InvalidParameter(
                "Azure AI endpoint cannot be empty".to_string(),
            ));
        }
        if self.api_version.trim().is_empty() {
            return Err(LlmError::InvalidParameter(
                "Azure AI api_version cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Headers for one call: auth and version first, then provider headers,
    /// then per-request headers. Later sources override earlier ones.
    pub fn request_headers(&self, extra: &HashMap<String, String>) -> Result<HeaderMap, LlmError> {
        Ok(HttpHeaderBuilder::new()
            .with_json_content_type()
            .with_header("api-key", self.api_key.expose_secret())?
            .with_header("api-version", &self.api_version)?
            .with_custom_headers(&self.headers)?
            .with_custom_headers(extra)?
            .build())
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    pub fn embeddings_url(&self, model_id: &str) -> String {
        format!("{}/deployments/{model_id}/embeddings", self.base_url)
    }
}

/// Per-model chat settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureChatSettings {
    /// Not honored by Azure AI; reported as an unsupported setting when set.
    pub safe_prompt: Option<bool>,
}

impl AzureChatSettings {
    pub fn with_safe_prompt(mut self, safe_prompt: bool) -> Self {
        self.safe_prompt = Some(safe_prompt);
        self
    }
}

/// Per-model embedding settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureEmbeddingSettings {
    /// Advisory batch limit surfaced through `max_embeddings_per_call`.
    pub max_embeddings_per_call: Option<usize>,
}

impl AzureEmbeddingSettings {
    pub fn with_max_embeddings_per_call(mut self, max: usize) -> Self {
        self.max_embeddings_per_call = Some(max);
        self
    }
}
