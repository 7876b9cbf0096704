//! Azure AI chat model.

use async_trait::async_trait;

use super::config::{AzureAiConfig, AzureChatSettings};
use super::errors::parse_azure_error;
use super::finish_reason::map_azure_finish_reason;
use super::request::{build_chat_args, split_raw_call};
use super::streaming::into_chat_stream;
use super::types::{AzureChatResponse, AzureUsage};
use crate::error::LlmError;
use crate::traits::LanguageModel;
use crate::types::{
    ChatRequest, ChatResponse, ChatStreamResponse, ResponseMetadata, ToolCall, Usage,
};
use crate::utils::cancel::{abortable_stream, run_abortable};
use crate::utils::headers::header_map_to_hash_map;

pub const CHAT_PROVIDER_ID: &str = "azure.ai";

/// Chat model bound to one Azure AI deployment.
#[derive(Debug, Clone)]
pub struct AzureChatModel {
    model_id: String,
    settings: AzureChatSettings,
    config: AzureAiConfig,
}

impl AzureChatModel {
    pub fn new(
        model_id: impl Into<String>,
        settings: AzureChatSettings,
        config: AzureAiConfig,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            settings,
            config,
        }
    }

    pub fn settings(&self) -> &AzureChatSettings {
        &self.settings
    }

    pub fn config(&self) -> &AzureAiConfig {
        &self.config
    }
}

fn convert_usage(usage: Option<AzureUsage>) -> Usage {
    usage
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        })
        .unwrap_or_default()
}

fn response_metadata(response: &AzureChatResponse) -> ResponseMetadata {
    ResponseMetadata {
        id: response.id.clone(),
        model: response.model.clone(),
        created: response
            .created
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
    }
}

#[async_trait]
impl LanguageModel for AzureChatModel {
    fn provider(&self) -> &str {
        CHAT_PROVIDER_ID
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn do_generate(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        let args = build_chat_args(&self.model_id, &request, &self.settings)?;
        let raw_call = split_raw_call(&args.body)?;
        let request_body = serde_json::to_string(&args.body)?;
        let headers = self.config.request_headers(&request.headers)?;
        let url = self.config.chat_completions_url();

        tracing::debug!(url = %url, model = %self.model_id, stream = false, "Sending Azure AI chat request");

        let http = &self.config.http_client;
        let (status, response_headers, text) = run_abortable(request.abort.as_ref(), async {
            let resp = http
                .post(&url)
                .headers(headers)
                .body(request_body.clone())
                .send()
                .await?;
            let status = resp.status();
            let response_headers = header_map_to_hash_map(resp.headers());
            let text = resp.text().await?;
            Ok::<_, LlmError>((status, response_headers, text))
        })
        .await?;

        if !status.is_success() {
            return Err(parse_azure_error(status.as_u16(), &text)?);
        }

        let response: AzureChatResponse = serde_json::from_str(&text).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse Azure AI chat response: {e}"))
        })?;
        let metadata = response_metadata(&response);
        let usage = convert_usage(response.usage);

        let Some(choice) = response.choices.into_iter().flatten().next() else {
            tracing::warn!(model = %self.model_id, "Azure AI chat response contained no choices");
            return Ok(ChatResponse {
                usage,
                warnings: args.warnings,
                raw_call,
                request_body,
                response_headers,
                response: metadata,
                ..Default::default()
            });
        };

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                tool_call_id: call.id,
                tool_name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        Ok(ChatResponse {
            text: choice.message.content.unwrap_or_default(),
            tool_calls,
            finish_reason: map_azure_finish_reason(choice.finish_reason.as_deref()),
            usage,
            warnings: args.warnings,
            raw_call,
            request_body,
            response_headers,
            response: metadata,
        })
    }

    async fn do_stream(&self, request: ChatRequest) -> Result<ChatStreamResponse, LlmError> {
        let args = build_chat_args(&self.model_id, &request, &self.settings)?;
        let raw_call = split_raw_call(&args.body)?;

        let mut body = args.body;
        body.stream = Some(true);
        let request_body = serde_json::to_string(&body)?;
        let headers = self.config.request_headers(&request.headers)?;
        let url = self.config.chat_completions_url();

        tracing::debug!(url = %url, model = %self.model_id, stream = true, "Sending Azure AI chat request");

        let abort = request.abort.as_ref();
        let http = &self.config.http_client;
        let resp = run_abortable(abort, async {
            Ok::<_, LlmError>(http
                .post(&url)
                .headers(headers)
                .body(request_body.clone())
                .send()
                .await?)
        })
        .await?;

        let status = resp.status();
        let response_headers = header_map_to_hash_map(resp.headers());

        if !status.is_success() {
            let text = run_abortable(abort, async { Ok::<_, LlmError>(resp.text().await?) }).await?;
            return Err(parse_azure_error(status.as_u16(), &text).unwrap_or_else(|_| {
                LlmError::HttpError(format!(
                    "Failed to get chat completions: {}",
                    status.as_u16()
                ))
            }));
        }

        let stream = abortable_stream(into_chat_stream(resp.bytes_stream()), request.abort.clone());

        Ok(ChatStreamResponse {
            stream,
            warnings: args.warnings,
            raw_call,
            request_body,
            response_headers,
        })
    }
}
