//! Azure AI streaming
//!
//! Translates the `/chat/completions` server-sent-event stream into
//! [`ChatStreamEvent`]s. Each call owns a fresh [`AzureStreamTranslator`];
//! the translator is pulled frame by frame as the consumer polls.

use std::collections::HashMap;

use eventsource_stream::Eventsource;
use futures_util::{Stream, StreamExt};

use super::finish_reason::map_azure_finish_reason;
use super::types::{AzureStreamChunk, AzureToolCallDelta};
use crate::error::LlmError;
use crate::types::{ChatStream, ChatStreamEvent, FinishReason, ToolCall, Usage};

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, Default)]
struct ToolCallBuffer {
    id: String,
    name: String,
    arguments: String,
}

/// Per-call translation state.
#[derive(Debug, Default)]
pub struct AzureStreamTranslator {
    finish_reason: FinishReason,
    usage: Usage,
    tool_calls: Vec<ToolCallBuffer>,
    tool_call_index_by_id: HashMap<String, usize>,
    /// Fragment `index` → call id, for follow-up fragments that omit the id.
    tool_call_id_by_index: HashMap<u32, String>,
    finished: bool,
}

impl AzureStreamTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set once the `[DONE]` frame has been seen; later frames are ignored.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Translate one SSE `data:` payload.
    ///
    /// Within a frame, tool calls are emitted before text. A payload that is
    /// not JSON fails with [`LlmError::ParseError`].
    pub fn process_data(&mut self, data: &str) -> Result<Vec<ChatStreamEvent>, LlmError> {
        if self.finished {
            return Ok(Vec::new());
        }

        let data = data.trim();
        if data.is_empty() {
            return Ok(Vec::new());
        }
        if data == DONE_MARKER {
            self.finished = true;
            return Ok(vec![ChatStreamEvent::Finish {
                finish_reason: self.finish_reason.clone(),
                usage: self.usage,
            }]);
        }

        let chunk: AzureStreamChunk = serde_json::from_str(data)
            .map_err(|e| LlmError::ParseError(format!("Failed to parse Azure AI stream chunk: {e}")))?;

        let mut events = Vec::new();

        if let Some(usage) = chunk.usage {
            self.usage = Usage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
            };
        }

        let Some(choice) = chunk.choices.into_iter().flatten().next() else {
            return Ok(events);
        };

        let mut delta_finish_reason = None;
        if let Some(delta) = choice.delta {
            for fragment in delta.tool_calls.unwrap_or_default() {
                if let Some(call) = self.accumulate_tool_call(fragment) {
                    events.push(ChatStreamEvent::ToolCall(call));
                }
            }
            if let Some(content) = delta.content.filter(|c| !c.is_empty()) {
                events.push(ChatStreamEvent::TextDelta { delta: content });
            }
            delta_finish_reason = delta.finish_reason;
        }

        if let Some(reason) = choice.finish_reason.or(delta_finish_reason) {
            self.finish_reason = map_azure_finish_reason(Some(&reason));
        }

        Ok(events)
    }

    /// Fold one fragment into its buffer and return the call when the
    /// accumulated arguments currently form valid JSON.
    fn accumulate_tool_call(&mut self, fragment: AzureToolCallDelta) -> Option<ToolCall> {
        let id = match (&fragment.id, fragment.index) {
            (Some(id), index) if !id.is_empty() => {
                if let Some(index) = index {
                    self.tool_call_id_by_index
                        .entry(index)
                        .or_insert_with(|| id.clone());
                }
                id.clone()
            }
            (_, Some(index)) => match self.tool_call_id_by_index.get(&index) {
                Some(id) => id.clone(),
                None => {
                    tracing::debug!(index, "Skipping tool call fragment with unknown index");
                    return None;
                }
            },
            _ => {
                tracing::debug!("Skipping tool call fragment without id or index");
                return None;
            }
        };

        let pos = match self.tool_call_index_by_id.get(&id) {
            Some(pos) => *pos,
            None => {
                self.tool_calls.push(ToolCallBuffer {
                    id: id.clone(),
                    ..Default::default()
                });
                let pos = self.tool_calls.len() - 1;
                self.tool_call_index_by_id.insert(id, pos);
                pos
            }
        };
        let buffer = &mut self.tool_calls[pos];

        let mut changed = false;
        if let Some(function) = fragment.function {
            if let Some(name) = function.name.filter(|n| !n.is_empty()) {
                buffer.name = name;
                changed = true;
            }
            if let Some(arguments) = function.arguments.filter(|a| !a.is_empty()) {
                buffer.arguments.push_str(&arguments);
                changed = true;
            }
        }

        if !changed || buffer.name.is_empty() || buffer.arguments.is_empty() {
            return None;
        }

        if let Err(e) = serde_json::from_str::<serde_json::Value>(&buffer.arguments) {
            tracing::debug!(
                tool_call_id = %buffer.id,
                error = %e,
                "Failed to parse tool call arguments"
            );
            return None;
        }

        Some(ToolCall {
            tool_call_id: buffer.id.clone(),
            tool_name: buffer.name.clone(),
            arguments: buffer.arguments.clone(),
        })
    }
}

/// Wrap an SSE byte stream as a [`ChatStream`].
///
/// The stream ends after the `[DONE]` frame, on the first error, or when the
/// transport closes.
pub fn into_chat_stream<S, B, E>(byte_stream: S) -> ChatStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let out = async_stream::stream! {
        let mut translator = AzureStreamTranslator::new();
        let mut sse_stream = Box::pin(byte_stream.eventsource());

        while let Some(item) = sse_stream.next().await {
            let event = match item {
                Ok(ev) => ev,
                Err(e) => {
                    yield Err(LlmError::StreamError(format!("SSE stream error (azure.ai): {e}")));
                    return;
                }
            };

            match translator.process_data(&event.data) {
                Ok(events) => {
                    for ev in events {
                        yield Ok(ev);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }

            if translator.is_finished() {
                return;
            }
        }
    };

    Box::pin(out)
}
