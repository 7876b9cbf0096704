//! Azure AI provider: the factory for chat and embedding models.

use super::chat::AzureChatModel;
use super::config::{AzureAiProviderSettings, AzureChatSettings, AzureEmbeddingSettings};
use super::embedding::AzureEmbeddingModel;
use crate::error::LlmError;

/// Creates models that share one set of provider settings.
///
/// Settings are resolved per model, so the `AZURE_API_KEY` fallback is read
/// when a model is created and a missing key fails right there.
#[derive(Debug, Clone, Default)]
pub struct AzureAiProvider {
    settings: AzureAiProviderSettings,
}

impl AzureAiProvider {
    pub fn new(settings: AzureAiProviderSettings) -> Self {
        Self { settings }
    }

    /// Provider configured from `AZURE_API_ENDPOINT`, `AZURE_API_KEY` and
    /// `AZURE_API_VERSION`.
    pub fn from_env() -> Self {
        Self::new(AzureAiProviderSettings::from_env())
    }

    pub fn settings(&self) -> &AzureAiProviderSettings {
        &self.settings
    }

    /// Chat model for a deployment.
    pub fn language_model(
        &self,
        model_id: impl Into<String>,
        settings: AzureChatSettings,
    ) -> Result<AzureChatModel, LlmError> {
        Ok(AzureChatModel::new(
            model_id,
            settings,
            self.settings.resolve()?,
        ))
    }

    /// Alias of [`Self::language_model`].
    pub fn chat(
        &self,
        model_id: impl Into<String>,
        settings: AzureChatSettings,
    ) -> Result<AzureChatModel, LlmError> {
        self.language_model(model_id, settings)
    }

    /// Embedding model for a deployment.
    pub fn text_embedding_model(
        &self,
        model_id: impl Into<String>,
        settings: AzureEmbeddingSettings,
    ) -> Result<AzureEmbeddingModel, LlmError> {
        Ok(AzureEmbeddingModel::new(
            model_id,
            settings,
            self.settings.resolve()?,
        ))
    }

    /// Alias of [`Self::text_embedding_model`].
    pub fn embedding(
        &self,
        model_id: impl Into<String>,
        settings: AzureEmbeddingSettings,
    ) -> Result<AzureEmbeddingModel, LlmError> {
        self.text_embedding_model(model_id, settings)
    }
}

/// Shorthand for `AzureAiProvider::new(settings)`.
pub fn create_azure(settings: AzureAiProviderSettings) -> AzureAiProvider {
    AzureAiProvider::new(settings)
}
