//! Interactive chat against an Azure AI deployment.
//!
//! ```bash
//! export AZURE_API_ENDPOINT="https://<resource>.services.ai.azure.com/models"
//! export AZURE_API_KEY="..."
//! RUST_LOG=siumai_provider_azure_ai=debug cargo run --example chat_repl -- gpt-4o
//! ```
//!
//! Type a message and press enter; an empty line or `/quit` exits. The model
//! can call a `get_weather` tool, whose canned result is fed back so the
//! conversation continues.

use futures::StreamExt;
use serde_json::json;
use siumai_provider_azure_ai::prelude::*;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

fn weather_tool() -> Tool {
    Tool::function(
        "get_weather",
        "Get the current weather for a location",
        json!({
            "type": "object",
            "properties": {
                "location": {"type": "string", "description": "City name"}
            },
            "required": ["location"]
        }),
    )
}

fn run_weather_tool(arguments: &str) -> serde_json::Value {
    let location = serde_json::from_str::<serde_json::Value>(arguments)
        .ok()
        .and_then(|v| v["location"].as_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());
    json!({"location": location, "temperature_c": 21, "conditions": "sunny"})
}

/// Stream one assistant turn, returning its text and the final tool calls.
async fn stream_turn(
    model: &AzureChatModel,
    messages: &[ChatMessage],
) -> Result<(String, Vec<ToolCall>), LlmError> {
    let request = ChatRequest::new(messages.to_vec())
        .with_mode(GenerationMode::with_tools(vec![weather_tool()], None));
    let mut response = model.do_stream(request).await?;
    for warning in &response.warnings {
        tracing::warn!(?warning, "call warning");
    }

    let mut stdout = tokio::io::stdout();
    let mut text = String::new();
    let mut tool_calls: Vec<ToolCall> = Vec::new();

    while let Some(event) = response.stream.next().await {
        match event? {
            ChatStreamEvent::TextDelta { delta } => {
                stdout.write_all(delta.as_bytes()).await.ok();
                stdout.flush().await.ok();
                text.push_str(&delta);
            }
            // Later events for the same id carry longer arguments.
            ChatStreamEvent::ToolCall(call) => {
                match tool_calls
                    .iter_mut()
                    .find(|c| c.tool_call_id == call.tool_call_id)
                {
                    Some(existing) => *existing = call,
                    None => tool_calls.push(call),
                }
            }
            ChatStreamEvent::Finish {
                finish_reason,
                usage,
            } => {
                tracing::debug!(?finish_reason, ?usage, "turn finished");
            }
        }
    }
    println!();

    Ok((text, tool_calls))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model_id = std::env::args().nth(1).unwrap_or_else(|| "gpt-4o".to_string());
    let model = AzureAiProvider::from_env().chat(model_id, AzureChatSettings::default())?;

    let mut messages = vec![ChatMessage::system(
        "You are a helpful assistant. Use get_weather for weather questions.",
    )];
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line == "/quit" {
            break;
        }
        messages.push(ChatMessage::user(line));

        loop {
            let (text, tool_calls) = stream_turn(&model, &messages).await?;
            if tool_calls.is_empty() {
                messages.push(ChatMessage::assistant(text));
                break;
            }

            let mut parts = Vec::new();
            if !text.is_empty() {
                parts.push(ContentPart::text(text));
            }
            let mut results = Vec::new();
            for call in &tool_calls {
                println!("[tool] {}({})", call.tool_name, call.arguments);
                let arguments = serde_json::from_str(&call.arguments).unwrap_or(json!({}));
                parts.push(ContentPart::tool_call(
                    &call.tool_call_id,
                    &call.tool_name,
                    arguments,
                ));
                results.push(ContentPart::tool_result_json(
                    &call.tool_call_id,
                    &call.tool_name,
                    run_weather_tool(&call.arguments),
                ));
            }
            messages.push(ChatMessage::assistant_with_content(parts));
            messages.push(ChatMessage::tool_results(results));
        }
    }

    Ok(())
}
