//! Azure finish reason → [`FinishReason`].

use crate::types::FinishReason;

/// Map an Azure finish reason; absent or unrecognized values become `Unknown`.
pub fn map_azure_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
        _ => FinishReason::Unknown,
    }
}
