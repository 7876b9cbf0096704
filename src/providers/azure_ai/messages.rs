//! Conversation → Azure message array.

use super::types::{
    AzureContentPart, AzureFileData, AzureFunctionCall, AzureImageUrl, AzureInputAudio,
    AzureMessage, AzureToolCall, AzureUserContent,
};
use crate::error::LlmError;
use crate::types::{ChatMessage, ContentPart, MediaSource, MessageContent, MessageRole};

const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

/// Convert a conversation into Azure's message array.
///
/// Tool turns expand to one message per tool result, so the output can be
/// longer than the input.
pub fn convert_to_azure_messages(messages: &[ChatMessage]) -> Result<Vec<AzureMessage>, LlmError> {
    let mut out = Vec::with_capacity(messages.len());

    for message in messages {
        match message.role {
            MessageRole::System => out.push(AzureMessage::System {
                content: text_only(MessageRole::System, &message.content)?,
            }),
            MessageRole::User => out.push(AzureMessage::User {
                content: convert_user_content(&message.content)?,
            }),
            MessageRole::Assistant => out.push(convert_assistant(&message.content)?),
            MessageRole::Tool => convert_tool_results(&message.content, &mut out)?,
        }
    }

    Ok(out)
}

fn unsupported(what: impl std::fmt::Display) -> LlmError {
    LlmError::UnsupportedOperation(what.to_string())
}

fn text_only(role: MessageRole, content: &MessageContent) -> Result<String, LlmError> {
    match content {
        MessageContent::Text(text) => Ok(text.clone()),
        MessageContent::MultiModal(parts) => {
            let mut texts = Vec::with_capacity(parts.len());
            for part in parts {
                match part {
                    ContentPart::Text { text } => texts.push(text.as_str()),
                    other => {
                        return Err(unsupported(format!(
                            "{} content parts in {} messages",
                            other.kind(),
                            role.as_str()
                        )));
                    }
                }
            }
            Ok(texts.join(" "))
        }
    }
}

fn convert_user_content(content: &MessageContent) -> Result<AzureUserContent, LlmError> {
    let parts = match content {
        MessageContent::Text(text) => return Ok(AzureUserContent::Text(text.clone())),
        MessageContent::MultiModal(parts) => parts,
    };

    if let [ContentPart::Text { text }] = parts.as_slice() {
        return Ok(AzureUserContent::Text(text.clone()));
    }

    parts
        .iter()
        .enumerate()
        .map(|(index, part)| convert_user_part(index, part))
        .collect::<Result<Vec<_>, _>>()
        .map(AzureUserContent::Parts)
}

fn convert_user_part(index: usize, part: &ContentPart) -> Result<AzureContentPart, LlmError> {
    match part {
        ContentPart::Text { text } => Ok(AzureContentPart::Text { text: text.clone() }),
        ContentPart::Image {
            source,
            media_type,
            detail,
        } => {
            let url = match source {
                MediaSource::Url { url } => url.clone(),
                MediaSource::Base64 { data } if data.starts_with("data:") => data.clone(),
                MediaSource::Base64 { .. } | MediaSource::Binary { .. } => {
                    let media_type = media_type.as_deref().unwrap_or(DEFAULT_IMAGE_MEDIA_TYPE);
                    let data = source.as_base64().unwrap_or_default();
                    format!("data:{media_type};base64,{data}")
                }
            };
            Ok(AzureContentPart::ImageUrl {
                image_url: AzureImageUrl {
                    url,
                    detail: detail.unwrap_or_default(),
                },
            })
        }
        ContentPart::File {
            source,
            media_type,
            filename,
        } => {
            let Some(data) = source.as_base64() else {
                return Err(unsupported("file content parts with URL data"));
            };

            match media_type.as_str() {
                "audio/wav" => Ok(AzureContentPart::InputAudio {
                    input_audio: AzureInputAudio {
                        data,
                        format: "wav",
                    },
                }),
                "audio/mp3" | "audio/mpeg" => Ok(AzureContentPart::InputAudio {
                    input_audio: AzureInputAudio {
                        data,
                        format: "mp3",
                    },
                }),
                "application/pdf" => Ok(AzureContentPart::File {
                    file: AzureFileData {
                        filename: filename
                            .clone()
                            .unwrap_or_else(|| format!("part-{index}.pdf")),
                        file_data: format!("data:application/pdf;base64,{data}"),
                    },
                }),
                other => Err(unsupported(format!(
                    "file content part type {other} in user messages"
                ))),
            }
        }
        ContentPart::ToolCall { .. } | ContentPart::ToolResult { .. } => Err(unsupported(
            format!("{} content parts in user messages", part.kind()),
        )),
    }
}

fn convert_assistant(content: &MessageContent) -> Result<AzureMessage, LlmError> {
    let parts = match content {
        MessageContent::Text(text) => {
            return Ok(AzureMessage::Assistant {
                content: text.clone(),
                tool_calls: None,
            });
        }
        MessageContent::MultiModal(parts) => parts,
    };

    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for part in parts {
        match part {
            ContentPart::Text { text } => texts.push(text.as_str()),
            ContentPart::ToolCall {
                tool_call_id,
                tool_name,
                arguments,
            } => tool_calls.push(AzureToolCall {
                id: tool_call_id.clone(),
                kind: "function".to_string(),
                function: AzureFunctionCall {
                    name: tool_name.clone(),
                    arguments: serde_json::to_string(arguments)?,
                },
            }),
            ContentPart::Image { .. } | ContentPart::File { .. } | ContentPart::ToolResult { .. } => {
                return Err(unsupported(format!(
                    "{} content parts in assistant messages",
                    part.kind()
                )));
            }
        }
    }

    // Multiple text parts are space-joined.
    Ok(AzureMessage::Assistant {
        content: texts.join(" "),
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
    })
}

fn convert_tool_results(
    content: &MessageContent,
    out: &mut Vec<AzureMessage>,
) -> Result<(), LlmError> {
    let MessageContent::MultiModal(parts) = content else {
        return Err(unsupported("tool messages without tool-result parts"));
    };

    for part in parts {
        let ContentPart::ToolResult {
            tool_call_id,
            output,
            ..
        } = part
        else {
            return Err(unsupported(format!(
                "{} content parts in tool messages",
                part.kind()
            )));
        };

        out.push(AzureMessage::Tool {
            content: output.to_wire_text()?,
            tool_call_id: tool_call_id.clone(),
        });
    }

    Ok(())
}
