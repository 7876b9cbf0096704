//! Azure AI Inference wire types.
//!
//! Request types only serialize, response types only deserialize; optional
//! fields are skipped rather than sent as `null`.

use serde::{Deserialize, Serialize};

use crate::types::ImageDetail;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum AzureMessage {
    System {
        content: String,
    },
    User {
        content: AzureUserContent,
    },
    Assistant {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<AzureToolCall>>,
    },
    Tool {
        content: String,
        tool_call_id: String,
    },
}

/// User content: a bare string for single-text turns, otherwise typed parts.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AzureUserContent {
    Text(String),
    Parts(Vec<AzureContentPart>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AzureContentPart {
    Text { text: String },
    ImageUrl { image_url: AzureImageUrl },
    InputAudio { input_audio: AzureInputAudio },
    File { file: AzureFileData },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AzureImageUrl {
    pub url: String,
    pub detail: ImageDetail,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AzureInputAudio {
    pub data: String,
    pub format: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AzureFileData {
    pub filename: String,
    pub file_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AzureToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: AzureFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AzureFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

fn function_type() -> String {
    "function".to_string()
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AzureTool {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: AzureFunctionDefinition,
}

impl AzureTool {
    pub fn function(
        name: impl Into<String>,
        description: Option<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            kind: "function",
            function: AzureFunctionDefinition {
                name: name.into(),
                description,
                parameters,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AzureFunctionDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: serde_json::Value,
}

/// Azure's tool-choice sentinels; `Any` forces a tool call.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AzureToolChoice {
    Auto,
    None,
    Any,
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AzureResponseFormat {
    JsonObject,
    JsonSchema { json_schema: AzureJsonSchema },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AzureJsonSchema {
    pub schema: serde_json::Value,
    pub strict: bool,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AzureChatRequest {
    pub model: String,
    pub messages: Vec<AzureMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<AzureResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AzureTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<AzureToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AzureUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureChatResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    pub created: Option<i64>,
    /// Some deployments send `"choices": null`.
    pub choices: Option<Vec<AzureChoice>>,
    pub usage: Option<AzureUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureChoice {
    pub index: Option<u32>,
    pub message: AzureResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureResponseMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<AzureToolCall>>,
}

/// One `data:` payload of a streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct AzureStreamChunk {
    pub id: Option<String>,
    pub model: Option<String>,
    /// `null` on usage-only frames.
    pub choices: Option<Vec<AzureStreamChoice>>,
    pub usage: Option<AzureUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureStreamChoice {
    pub index: Option<u32>,
    pub delta: Option<AzureDelta>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureDelta {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<AzureToolCallDelta>>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureToolCallDelta {
    pub index: Option<u32>,
    pub id: Option<String>,
    pub function: Option<AzureFunctionDelta>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureFunctionDelta {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AzureEmbeddingRequest<'a> {
    pub input: &'a [String],
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureEmbeddingResponse {
    pub data: Vec<AzureEmbeddingItem>,
    pub usage: Option<AzureEmbeddingUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureEmbeddingItem {
    pub index: Option<usize>,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureEmbeddingUsage {
    pub prompt_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}
