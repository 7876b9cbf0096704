//! Streaming event types for real-time responses

use futures::Stream;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::pin::Pin;

use super::response::{CallWarning, FinishReason, RawCall, ToolCall, Usage};
use crate::error::LlmError;

/// Chat streaming event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChatStreamEvent {
    /// Incremental text, exactly as received.
    TextDelta { delta: String },
    /// A tool call whose arguments are currently well-formed JSON.
    ///
    /// The same call id may appear again with longer arguments.
    ToolCall(ToolCall),
    /// Terminal event.
    Finish {
        finish_reason: FinishReason,
        usage: Usage,
    },
}

/// Chat stream type
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatStreamEvent, LlmError>> + Send>>;

/// A stream plus the call metadata known before the first event.
pub struct ChatStreamResponse {
    pub stream: ChatStream,
    pub warnings: Vec<CallWarning>,
    pub raw_call: RawCall,
    pub request_body: String,
    pub response_headers: HashMap<String, String>,
}

impl std::fmt::Debug for ChatStreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStreamResponse")
            .field("warnings", &self.warnings)
            .field("request_body", &self.request_body)
            .field("response_headers", &self.response_headers)
            .finish_non_exhaustive()
    }
}
