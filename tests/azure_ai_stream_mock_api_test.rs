//! Mock API tests for Azure AI streaming chat
//!
//! SSE bodies are served verbatim by wiremock and consumed through
//! `LanguageModel::do_stream`.

use futures_util::StreamExt;
use serde_json::json;
use siumai_provider_azure_ai::prelude::*;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_body(frames: &[serde_json::Value]) -> String {
    let mut body = String::new();
    for frame in frames {
        body.push_str(&format!("data: {frame}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn model(server: &MockServer) -> AzureChatModel {
    AzureAiProvider::new(
        AzureAiProviderSettings::new()
            .with_endpoint(format!("{}/models", server.uri()))
            .with_api_key("test-api-key"),
    )
    .chat("gpt-4o", AzureChatSettings::default())
    .unwrap()
}

async fn collect(response: ChatStreamResponse) -> Vec<ChatStreamEvent> {
    response
        .stream
        .map(|item| item.expect("stream item"))
        .collect()
        .await
}

#[tokio::test]
async fn test_azure_stream_text_deltas() {
    let mock_server = MockServer::start().await;

    let body = sse_body(&[
        json!({"id": "c1", "model": "gpt-4o", "choices": [{"index": 0, "delta": {"role": "assistant", "content": ""}}]}),
        json!({"id": "c1", "choices": [{"index": 0, "delta": {"content": "Hel"}}]}),
        json!({"id": "c1", "choices": [{"index": 0, "delta": {"content": "lo"}}]}),
        json!({"id": "c1", "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}],
               "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}}),
    ]);

    Mock::given(method("POST"))
        .and(path("/models/chat/completions"))
        .and(header("api-key", "test-api-key"))
        .and(body_partial_json(json!({"stream": true, "model": "gpt-4o"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "text/event-stream")
                .insert_header("x-request-id", "stream-1"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = model(&mock_server)
        .do_stream(ChatRequest::new(vec![ChatMessage::user("Say hello")]))
        .await
        .unwrap();

    assert_eq!(
        response.response_headers.get("x-request-id").map(String::as_str),
        Some("stream-1")
    );
    let sent: serde_json::Value = serde_json::from_str(&response.request_body).unwrap();
    assert_eq!(sent["stream"], true);
    assert!(response.raw_call.raw_settings.get("stream").is_none());

    let events = collect(response).await;
    assert_eq!(
        events,
        vec![
            ChatStreamEvent::TextDelta {
                delta: "Hel".into()
            },
            ChatStreamEvent::TextDelta { delta: "lo".into() },
            ChatStreamEvent::Finish {
                finish_reason: FinishReason::Stop,
                usage: Usage::new(5, 2),
            },
        ]
    );
}

#[tokio::test]
async fn test_azure_stream_tool_call_accumulation() {
    let mock_server = MockServer::start().await;

    let body = sse_body(&[
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "id": "call_1", "type": "function", "function": {"name": "get_weather", "arguments": ""}}
        ]}}]}),
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "function": {"arguments": "{\"location\":"}}
        ]}}]}),
        json!({"choices": [{"index": 0, "delta": {"tool_calls": [
            {"index": 0, "function": {"arguments": "\"Paris\"}"}}
        ]}}]}),
        json!({"choices": [{"index": 0, "delta": {}, "finish_reason": "tool_calls"}]}),
    ]);

    Mock::given(method("POST"))
        .and(path("/models/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let request = ChatRequest::new(vec![ChatMessage::user("Weather in Paris?")]).with_mode(
        GenerationMode::with_tools(
            vec![Tool::function(
                "get_weather",
                "Get the weather",
                json!({"type": "object"}),
            )],
            None,
        ),
    );

    let response = model(&mock_server).do_stream(request).await.unwrap();
    let events = collect(response).await;

    assert_eq!(
        events,
        vec![
            ChatStreamEvent::ToolCall(ToolCall {
                tool_call_id: "call_1".into(),
                tool_name: "get_weather".into(),
                arguments: r#"{"location":"Paris"}"#.into(),
            }),
            ChatStreamEvent::Finish {
                finish_reason: FinishReason::ToolCalls,
                usage: Usage::default(),
            },
        ]
    );
}

#[tokio::test]
async fn test_azure_stream_error_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "401", "message": "Access denied due to invalid subscription key."}
        })))
        .mount(&mock_server)
        .await;

    let err = model(&mock_server)
        .do_stream(ChatRequest::new(vec![ChatMessage::user("Hello")]))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.to_string(), "Access denied due to invalid subscription key.");
}

#[tokio::test]
async fn test_azure_stream_non_success_without_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let err = model(&mock_server)
        .do_stream(ChatRequest::new(vec![ChatMessage::user("Hello")]))
        .await
        .unwrap_err();

    match err {
        LlmError::HttpError(msg) => assert_eq!(msg, "Failed to get chat completions: 500"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_azure_stream_malformed_frame_ends_with_parse_error() {
    let mock_server = MockServer::start().await;

    let body = "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n\ndata: not-json\n\n";
    Mock::given(method("POST"))
        .and(path("/models/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&mock_server)
        .await;

    let response = model(&mock_server)
        .do_stream(ChatRequest::new(vec![ChatMessage::user("Hello")]))
        .await
        .unwrap();
    let items: Vec<_> = response.stream.collect().await;

    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Ok(ChatStreamEvent::TextDelta { .. })));
    assert!(matches!(items[1], Err(LlmError::ParseError(_))));
}

#[tokio::test]
async fn test_azure_stream_abort_before_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&[]), "text/event-stream")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let handle = CancelHandle::new();
    let trigger = handle.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = model(&mock_server)
        .do_stream(ChatRequest::new(vec![ChatMessage::user("Hello")]).with_abort(handle))
        .await
        .unwrap_err();

    assert!(err.is_aborted());
}

#[tokio::test]
async fn test_azure_stream_abort_after_open_ends_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            sse_body(&[json!({"choices": [{"delta": {"content": "Hi"}}]})]),
            "text/event-stream",
        ))
        .mount(&mock_server)
        .await;

    let handle = CancelHandle::new();
    let response = model(&mock_server)
        .do_stream(ChatRequest::new(vec![ChatMessage::user("Hello")]).with_abort(handle.clone()))
        .await
        .unwrap();

    handle.cancel();
    let items: Vec<_> = response.stream.collect().await;

    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(LlmError::Aborted)));
}
