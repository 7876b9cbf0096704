//! Inbound call shapes.

use std::collections::HashMap;

use super::chat::ChatMessage;
use super::params::{CallSettings, GenerationMode};
use crate::utils::cancel::CancelHandle;

/// One chat generation call.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub mode: GenerationMode,
    pub messages: Vec<ChatMessage>,
    pub settings: CallSettings,
    /// Abort signal observed while the call is in flight.
    pub abort: Option<CancelHandle>,
    /// Per-request headers, merged over the provider headers.
    pub headers: HashMap<String, String>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_settings(mut self, settings: CallSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_abort(mut self, abort: CancelHandle) -> Self {
        self.abort = Some(abort);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// One embedding call over a batch of inputs.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingRequest {
    pub values: Vec<String>,
    pub abort: Option<CancelHandle>,
    pub headers: HashMap<String, String>,
}

impl EmbeddingRequest {
    pub fn new(values: Vec<String>) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    pub fn with_abort(mut self, abort: CancelHandle) -> Self {
        self.abort = Some(abort);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
