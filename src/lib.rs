//! # siumai-provider-azure-ai
//!
//! Azure AI Inference provider: chat completions (one-shot and streaming)
//! and text embeddings behind the [`LanguageModel`] / [`EmbeddingModel`]
//! traits.
//!
#![deny(unsafe_code)]

//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use siumai_provider_azure_ai::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Endpoint and key from AZURE_API_ENDPOINT / AZURE_API_KEY
//!     let provider = AzureAiProvider::from_env();
//!     let model = provider.chat("gpt-4o", AzureChatSettings::default())?;
//!
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are terse."),
//!         ChatMessage::user("Say hello"),
//!     ]);
//!
//!     let mut response = model.do_stream(request).await?;
//!     while let Some(event) = response.stream.next().await {
//!         if let ChatStreamEvent::TextDelta { delta } = event? {
//!             print!("{delta}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod providers;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::LlmError;
pub use providers::azure_ai::{
    AzureAiProvider, AzureAiProviderSettings, AzureChatModel, AzureChatSettings,
    AzureEmbeddingModel, AzureEmbeddingSettings, create_azure,
};
pub use traits::{EmbeddingModel, LanguageModel};
pub use utils::cancel::CancelHandle;

pub mod prelude {
    pub use crate::error::LlmError;
    pub use crate::providers::azure_ai::{
        AzureAiProvider, AzureAiProviderSettings, AzureChatModel, AzureChatSettings,
        AzureEmbeddingModel, AzureEmbeddingSettings, create_azure,
    };
    pub use crate::traits::{EmbeddingModel, LanguageModel};
    pub use crate::types::*;
    pub use crate::utils::cancel::CancelHandle;
}
