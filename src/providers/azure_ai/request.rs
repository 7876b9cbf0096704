//! Chat request body assembly.

use super::config::AzureChatSettings;
use super::messages::convert_to_azure_messages;
use super::tools::prepare_tools;
use super::types::{
    AzureChatRequest, AzureJsonSchema, AzureResponseFormat, AzureTool, AzureToolChoice,
};
use crate::error::LlmError;
use crate::types::{CallWarning, ChatRequest, GenerationMode, RawCall, ResponseFormat};

const DEFAULT_SCHEMA_NAME: &str = "response";

/// Request body plus the warnings collected while building it.
#[derive(Debug, Clone)]
pub struct ChatArgs {
    pub body: AzureChatRequest,
    pub warnings: Vec<CallWarning>,
}

/// Build the `/chat/completions` body for one call.
///
/// Messages are converted first, so unsupported content fails before any
/// other work is done.
pub fn build_chat_args(
    model_id: &str,
    request: &ChatRequest,
    chat_settings: &AzureChatSettings,
) -> Result<ChatArgs, LlmError> {
    let settings = &request.settings;
    let messages = convert_to_azure_messages(&request.messages)?;

    let mut warnings = Vec::new();
    if settings.top_k.is_some() {
        warnings.push(unsupported_setting("top_k"));
    }
    if chat_settings.safe_prompt.is_some() {
        warnings.push(unsupported_setting("safe_prompt"));
    }

    let mut body = AzureChatRequest {
        model: model_id.to_string(),
        messages,
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        top_p: settings.top_p,
        frequency_penalty: settings.frequency_penalty,
        presence_penalty: settings.presence_penalty,
        stop: settings.stop_sequences.clone(),
        seed: settings.seed,
        response_format: settings
            .response_format
            .as_ref()
            .and_then(encode_response_format),
        ..Default::default()
    };

    match &request.mode {
        GenerationMode::Regular { tools, tool_choice } => {
            let prepared = prepare_tools(tools, tool_choice.as_ref());
            if prepared.tools.is_some() && body.temperature.is_none() {
                body.temperature = Some(0.0);
            }
            body.tools = prepared.tools;
            body.tool_choice = prepared.tool_choice;
            warnings.extend(prepared.warnings);
        }
        GenerationMode::ObjectJson {
            schema,
            name,
            description,
        } => {
            body.response_format = Some(json_response_format(
                schema.clone(),
                name.clone(),
                description.clone(),
            ));
        }
        GenerationMode::ObjectTool { tool } => {
            body.tools = Some(vec![AzureTool::function(
                tool.name.clone(),
                tool.description.clone(),
                tool.parameters.clone(),
            )]);
            body.tool_choice = Some(AzureToolChoice::Any);
        }
    }

    Ok(ChatArgs { body, warnings })
}

/// Split a body into the prompt (messages) and everything else.
pub fn split_raw_call(body: &AzureChatRequest) -> Result<RawCall, LlmError> {
    let mut raw_settings = serde_json::to_value(body)?;
    let raw_prompt = raw_settings
        .as_object_mut()
        .and_then(|obj| obj.remove("messages"))
        .unwrap_or(serde_json::Value::Null);
    Ok(RawCall {
        raw_prompt,
        raw_settings,
    })
}

fn unsupported_setting(setting: &str) -> CallWarning {
    CallWarning::UnsupportedSetting {
        setting: setting.to_string(),
        details: None,
    }
}

fn encode_response_format(format: &ResponseFormat) -> Option<AzureResponseFormat> {
    match format {
        ResponseFormat::Text => None,
        ResponseFormat::Json {
            schema,
            name,
            description,
        } => Some(json_response_format(
            schema.clone(),
            name.clone(),
            description.clone(),
        )),
    }
}

fn json_response_format(
    schema: Option<serde_json::Value>,
    name: Option<String>,
    description: Option<String>,
) -> AzureResponseFormat {
    match schema {
        None => AzureResponseFormat::JsonObject,
        Some(schema) => AzureResponseFormat::JsonSchema {
            json_schema: AzureJsonSchema {
                schema,
                strict: true,
                name: name.unwrap_or_else(|| DEFAULT_SCHEMA_NAME.to_string()),
                description,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CallSettings, ChatMessage, Tool, ToolChoice, ToolFunction};
    use serde_json::json;

    fn request(mode: GenerationMode) -> ChatRequest {
        ChatRequest::new(vec![ChatMessage::user("Hello")]).with_mode(mode)
    }

    fn body_json(req: &ChatRequest) -> serde_json::Value {
        let args = build_chat_args("gpt-4o", req, &AzureChatSettings::default()).unwrap();
        serde_json::to_value(args.body).unwrap()
    }

    fn weather() -> Tool {
        Tool::function("get_weather", "Get the weather", json!({"type": "object"}))
    }

    #[test]
    fn regular_mode_without_tools_sends_base_fields_only() {
        let req = request(GenerationMode::regular())
            .with_settings(CallSettings::default().with_max_tokens(64));
        assert_eq!(
            body_json(&req),
            json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Hello"}],
                "max_tokens": 64
            })
        );
    }

    #[test]
    fn regular_mode_with_tools_defaults_temperature_to_zero() {
        let req = request(GenerationMode::with_tools(vec![weather()], None));
        let body = body_json(&req);
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["tools"][0]["function"]["name"], "get_weather");
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn explicit_temperature_is_kept_with_tools() {
        let req = request(GenerationMode::with_tools(
            vec![weather()],
            Some(ToolChoice::Required),
        ))
        .with_settings(CallSettings::default().with_temperature(0.7));
        let body = body_json(&req);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["tool_choice"], "any");
    }

    #[test]
    fn object_json_without_schema_uses_json_object() {
        let body = body_json(&request(GenerationMode::object_json(None)));
        assert_eq!(body["response_format"], json!({"type": "json_object"}));
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn object_json_with_schema_uses_strict_json_schema() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "number"}}});
        let body = body_json(&request(GenerationMode::object_json(Some(schema.clone()))));
        assert_eq!(
            body["response_format"],
            json!({
                "type": "json_schema",
                "json_schema": {"schema": schema, "strict": true, "name": "response"}
            })
        );
    }

    #[test]
    fn call_level_response_format_applies_in_regular_mode() {
        let req = request(GenerationMode::regular()).with_settings(
            CallSettings::default().with_response_format(ResponseFormat::Json {
                schema: Some(json!({"type": "object"})),
                name: Some("recipe".into()),
                description: Some("A recipe".into()),
            }),
        );
        let body = body_json(&req);
        assert_eq!(body["response_format"]["json_schema"]["name"], "recipe");
        assert_eq!(
            body["response_format"]["json_schema"]["description"],
            "A recipe"
        );

        let req = request(GenerationMode::regular())
            .with_settings(CallSettings::default().with_response_format(ResponseFormat::Text));
        assert!(body_json(&req).get("response_format").is_none());
    }

    #[test]
    fn object_tool_forces_single_tool() {
        let tool = ToolFunction {
            name: "json".into(),
            description: Some("Respond with a JSON object.".into()),
            parameters: json!({"type": "object"}),
        };
        let body = body_json(&request(GenerationMode::object_tool(tool)));
        assert_eq!(body["tools"].as_array().unwrap().len(), 1);
        assert_eq!(body["tools"][0]["function"]["name"], "json");
        assert_eq!(body["tool_choice"], "any");
    }

    #[test]
    fn unsupported_settings_become_warnings() {
        let mut settings = CallSettings::default();
        settings.top_k = Some(40);
        let req = request(GenerationMode::regular()).with_settings(settings);
        let args = build_chat_args(
            "gpt-4o",
            &req,
            &AzureChatSettings::default().with_safe_prompt(true),
        )
        .unwrap();

        let names: Vec<_> = args
            .warnings
            .iter()
            .map(|w| match w {
                CallWarning::UnsupportedSetting { setting, .. } => setting.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(names, ["top_k", "safe_prompt"]);
        assert!(serde_json::to_value(&args.body).unwrap().get("top_k").is_none());
    }

    #[test]
    fn unsupported_content_fails_before_body_is_built() {
        let req = ChatRequest::new(vec![ChatMessage::user_with_content(vec![
            crate::types::ContentPart::text("a"),
            crate::types::ContentPart::file_base64("AAAA", "image/gif"),
        ])]);
        let err = build_chat_args("m", &req, &AzureChatSettings::default()).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn raw_call_splits_messages_from_settings() {
        let req = request(GenerationMode::regular())
            .with_settings(CallSettings::default().with_seed(7));
        let args = build_chat_args("gpt-4o", &req, &AzureChatSettings::default()).unwrap();
        let raw = split_raw_call(&args.body).unwrap();

        assert_eq!(raw.raw_prompt, json!([{"role": "user", "content": "Hello"}]));
        assert_eq!(raw.raw_settings, json!({"model": "gpt-4o", "seed": 7}));
    }
}
