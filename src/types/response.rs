//! Result shapes returned to the caller.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reason why the model stopped generating tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FinishReason {
    /// Stop sequence hit or natural completion.
    Stop,
    /// `max_tokens` reached.
    Length,
    /// Output blocked by the content filter.
    ContentFilter,
    /// The model requested tool calls.
    ToolCalls,
    /// Missing or unrecognized reason.
    #[default]
    Unknown,
}

/// Token usage. Either count may be missing; that is not an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
        }
    }

    pub fn total_tokens(&self) -> Option<u32> {
        Some(self.prompt_tokens? + self.completion_tokens?)
    }
}

/// A function tool call produced by the model.
///
/// `arguments` is the raw JSON text exactly as the model produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCall {
    pub tool_call_id: String,
    pub tool_name: String,
    pub arguments: String,
}

/// Non-fatal notes about settings or tools the provider could not honor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CallWarning {
    UnsupportedSetting {
        setting: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    UnsupportedTool {
        tool_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

/// The request as sent, split into the prompt and the remaining settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCall {
    pub raw_prompt: serde_json::Value,
    pub raw_settings: serde_json::Value,
}

/// Response metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseMetadata {
    pub id: Option<String>,
    pub model: Option<String>,
    pub created: Option<chrono::DateTime<chrono::Utc>>,
}

/// Result of a one-shot chat generation.
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
    pub warnings: Vec<CallWarning>,
    pub raw_call: RawCall,
    /// JSON body that was sent.
    pub request_body: String,
    pub response_headers: HashMap<String, String>,
    pub response: ResponseMetadata,
}

/// Usage reported for an embedding call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbeddingUsage {
    pub tokens: Option<u32>,
}

/// Result of an embedding call, vectors in input order.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingResponse {
    pub embeddings: Vec<Vec<f32>>,
    pub usage: EmbeddingUsage,
    pub response_headers: HashMap<String, String>,
}
