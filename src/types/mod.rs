//! Provider-agnostic types.

pub mod chat;
pub mod params;
pub mod request;
pub mod response;
pub mod streaming;
pub mod tools;

pub use chat::{
    ChatMessage, ContentPart, ImageDetail, MediaSource, MessageContent, MessageRole,
    ToolResultOutput,
};
pub use params::{CallSettings, GenerationMode, ResponseFormat};
pub use request::{ChatRequest, EmbeddingRequest};
pub use response::{
    CallWarning, ChatResponse, EmbeddingResponse, EmbeddingUsage, FinishReason, RawCall,
    ResponseMetadata, ToolCall, Usage,
};
pub use streaming::{ChatStream, ChatStreamEvent, ChatStreamResponse};
pub use tools::{ProviderDefinedTool, Tool, ToolChoice, ToolFunction};
