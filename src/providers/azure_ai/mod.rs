//! Azure AI Inference provider
//!
//! Chat completions and embeddings against an Azure AI Inference endpoint
//! (`https://<resource>.services.ai.azure.com/models`), authenticated with an
//! `api-key` header.
//!
//! ```rust,no_run
//! use siumai_provider_azure_ai::prelude::*;
//!
//! # async fn run() -> Result<(), LlmError> {
//! let provider = AzureAiProvider::new(
//!     AzureAiProviderSettings::new()
//!         .with_endpoint("https://my-resource.services.ai.azure.com/models")
//!         .with_api_key("..."),
//! );
//! let model = provider.chat("gpt-4o", AzureChatSettings::default())?;
//! let response = model
//!     .do_generate(ChatRequest::new(vec![ChatMessage::user("Hello")]))
//!     .await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod config;
pub mod embedding;
pub mod errors;
pub mod finish_reason;
pub mod messages;
pub mod provider;
pub mod request;
pub mod streaming;
pub mod tools;
pub mod types;

pub use chat::AzureChatModel;
pub use config::{
    AzureAiConfig, AzureAiProviderSettings, AzureChatSettings, AzureEmbeddingSettings,
    DEFAULT_API_VERSION, DEFAULT_ENDPOINT,
};
pub use embedding::AzureEmbeddingModel;
pub use errors::parse_azure_error;
pub use finish_reason::map_azure_finish_reason;
pub use messages::convert_to_azure_messages;
pub use provider::{AzureAiProvider, create_azure};
pub use streaming::AzureStreamTranslator;
pub use tools::{PreparedTools, prepare_tools};
