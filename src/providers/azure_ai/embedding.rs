//! Azure AI embedding model.

use async_trait::async_trait;

use super::config::{AzureAiConfig, AzureEmbeddingSettings};
use super::types::{AzureEmbeddingRequest, AzureEmbeddingResponse};
use crate::error::LlmError;
use crate::traits::EmbeddingModel;
use crate::types::{EmbeddingRequest, EmbeddingResponse, EmbeddingUsage};
use crate::utils::cancel::run_abortable;
use crate::utils::headers::header_map_to_hash_map;

pub const EMBEDDING_PROVIDER_ID: &str = "azure.embedding";

/// Embedding model bound to one Azure AI deployment.
///
/// Every call sends the whole batch in one request; `max_embeddings_per_call`
/// is only reported to callers.
#[derive(Debug, Clone)]
pub struct AzureEmbeddingModel {
    model_id: String,
    settings: AzureEmbeddingSettings,
    config: AzureAiConfig,
}

impl AzureEmbeddingModel {
    pub fn new(
        model_id: impl Into<String>,
        settings: AzureEmbeddingSettings,
        config: AzureAiConfig,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            config,
        }
    }

    pub fn settings(&self) -> &AzureEmbeddingSettings {
        &self.settings
    }
}

/// Vectors in input order; items carrying an `index` are sorted by it.
fn into_ordered_embeddings(response: AzureEmbeddingResponse) -> Vec<Vec<f32>> {
    let mut items = response.data;
    if items.iter().all(|item| item.index.is_some()) {
        items.sort_by_key(|item| item.index);
    }
    items.into_iter().map(|item| item.embedding).collect()
}

#[async_trait]
impl EmbeddingModel for AzureEmbeddingModel {
    fn provider(&self) -> &str {
        EMBEDDING_PROVIDER_ID
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_embeddings_per_call(&self) -> Option<usize> {
        self.settings.max_embeddings_per_call
    }

    fn supports_parallel_calls(&self) -> bool {
        true
    }

    async fn do_embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, LlmError> {
        let url = self.config.embeddings_url(&self.model_id);
        let headers = self.config.request_headers(&request.headers)?;
        let body = serde_json::to_vec(&AzureEmbeddingRequest {
            input: &request.values,
        })?;

        tracing::debug!(url = %url, inputs = request.values.len(), "Sending Azure AI embedding request");

        let http = &self.config.http_client;
        let (status, response_headers, text) = run_abortable(request.abort.as_ref(), async {
            let resp = http.post(&url).headers(headers).body(body).send().await?;
            let status = resp.status();
            let response_headers = header_map_to_hash_map(resp.headers());
            let text = resp.text().await?;
            Ok::<_, LlmError>((status, response_headers, text))
        })
        .await?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            return Err(LlmError::api(
                status.as_u16(),
                format!("Failed to get embeddings: {reason}"),
                serde_json::from_str(&text).ok(),
            ));
        }

        let response: AzureEmbeddingResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse Azure AI embedding response: {e}"))
        })?;

        let usage = EmbeddingUsage {
            tokens: response.usage.as_ref().and_then(|u| u.total_tokens),
        };

        Ok(EmbeddingResponse {
            embeddings: into_ordered_embeddings(response),
            usage,
            response_headers,
        })
    }
}
