//! Provider interface traits.
//!
//! Callers program against these; [`crate::providers::azure_ai`] implements them.

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{
    ChatRequest, ChatResponse, ChatStreamResponse, EmbeddingRequest, EmbeddingResponse,
};

/// Chat-capable model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider id, e.g. `azure.ai`.
    fn provider(&self) -> &str;

    /// Model (deployment) id.
    fn model_id(&self) -> &str;

    /// One-shot generation.
    async fn do_generate(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;

    /// Streaming generation. Events are produced as the consumer polls.
    async fn do_stream(&self, request: ChatRequest) -> Result<ChatStreamResponse, LlmError>;
}

/// Text embedding model.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    /// Advisory batch limit; callers split batches themselves.
    fn max_embeddings_per_call(&self) -> Option<usize> {
        None
    }

    fn supports_parallel_calls(&self) -> bool {
        true
    }

    async fn do_embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, LlmError>;
}
