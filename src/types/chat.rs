//! Chat message types
//!
//! A conversation is an ordered list of [`ChatMessage`] turns. Each turn
//! carries either plain text or a sequence of typed [`ContentPart`]s.

use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// Media source - URL, base64 text, or raw bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MediaSource {
    /// URL (http, https, data URLs, etc.)
    Url { url: String },
    /// Base64-encoded data
    Base64 { data: String },
    /// Binary data (base64-encoded when sent)
    #[serde(skip)]
    Binary { data: Vec<u8> },
}

impl MediaSource {
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    pub fn base64(data: impl Into<String>) -> Self {
        Self::Base64 { data: data.into() }
    }

    pub fn binary(data: Vec<u8>) -> Self {
        Self::Binary { data }
    }

    /// Inline payload as base64, `None` for URL sources.
    pub fn as_base64(&self) -> Option<String> {
        match self {
            Self::Base64 { data } => Some(data.clone()),
            Self::Binary { data } => Some(base64_encode(data)),
            Self::Url { .. } => None,
        }
    }
}

/// Image detail level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageDetail {
    #[default]
    Auto,
    Low,
    High,
}

/// Output of a tool execution, sent back to the model in a tool turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToolResultOutput {
    /// Plain text, forwarded verbatim.
    Text { value: String },
    /// Structured value, serialized to JSON text on the wire.
    Json { value: serde_json::Value },
}

impl ToolResultOutput {
    /// Text form used on the wire.
    pub fn to_wire_text(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Text { value } => Ok(value.clone()),
            Self::Json { value } => serde_json::to_string(value),
        }
    }
}

/// Content part - provider-agnostic multimodal content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentPart {
    /// Text content
    Text { text: String },

    /// Image content
    Image {
        #[serde(flatten)]
        source: MediaSource,
        /// Mime type for inline data; `image/jpeg` is assumed when absent.
        #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
        media_type: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<ImageDetail>,
    },

    /// File content (audio clips, PDFs)
    File {
        #[serde(flatten)]
        source: MediaSource,
        #[serde(rename = "mediaType")]
        media_type: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
    },

    /// Tool call requested by the model
    #[serde(rename = "tool-call")]
    ToolCall {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        #[serde(rename = "input")]
        arguments: serde_json::Value,
    },

    /// Result of executing a tool call
    #[serde(rename = "tool-result")]
    ToolResult {
        #[serde(rename = "toolCallId")]
        tool_call_id: String,
        #[serde(rename = "toolName")]
        tool_name: String,
        output: ToolResultOutput,
    },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::Image {
            source: MediaSource::url(url),
            media_type: None,
            detail: None,
        }
    }

    pub fn image_bytes(data: Vec<u8>, media_type: Option<String>) -> Self {
        Self::Image {
            source: MediaSource::binary(data),
            media_type,
            detail: None,
        }
    }

    pub fn file_base64(data: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self::File {
            source: MediaSource::base64(data),
            media_type: media_type.into(),
            filename: None,
        }
    }

    pub fn tool_call(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self::ToolCall {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            arguments,
        }
    }

    pub fn tool_result_text(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            output: ToolResultOutput::Text {
                value: value.into(),
            },
        }
    }

    pub fn tool_result_json(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        Self::ToolResult {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            output: ToolResultOutput::Json { value },
        }
    }

    /// Short tag used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::File { .. } => "file",
            Self::ToolCall { .. } => "tool-call",
            Self::ToolResult { .. } => "tool-result",
        }
    }
}

/// Message content: plain text or an ordered list of parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    MultiModal(Vec<ContentPart>),
}

/// One turn of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user_with_content(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::MultiModal(parts),
        }
    }

    pub fn assistant_with_content(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::MultiModal(parts),
        }
    }

    /// A tool turn carrying one or more tool results.
    pub fn tool_results(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: MessageContent::MultiModal(parts),
        }
    }
}

fn base64_encode(data: &[u8]) -> String {
    use base64::{Engine, engine::general_purpose::STANDARD};
    STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_media_source_encodes_to_base64() {
        let src = MediaSource::binary(vec![0, 1, 2, 3]);
        assert_eq!(src.as_base64().as_deref(), Some("AAECAw=="));
        assert!(MediaSource::url("https://x/y.png").as_base64().is_none());
    }

    #[test]
    fn json_tool_result_serializes_to_text() {
        let out = ToolResultOutput::Json {
            value: serde_json::json!({"ok": true}),
        };
        assert_eq!(out.to_wire_text().unwrap(), r#"{"ok":true}"#);

        let out = ToolResultOutput::Text {
            value: "plain".into(),
        };
        assert_eq!(out.to_wire_text().unwrap(), "plain");
    }

    #[test]
    fn content_part_uses_kebab_case_tags() {
        let part = ContentPart::tool_call("call_1", "lookup", serde_json::json!({"q": 1}));
        let v = serde_json::to_value(&part).unwrap();
        assert_eq!(v["type"], "tool-call");
        assert_eq!(v["toolCallId"], "call_1");
        assert_eq!(v["input"]["q"], 1);
    }
}
