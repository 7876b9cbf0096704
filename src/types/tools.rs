//! Tool declarations and tool-choice policy.

use serde::{Deserialize, Serialize};

/// Function tool schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolFunction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema for the function parameters
    pub parameters: serde_json::Value,
}

/// A provider-defined (hosted) tool, identified as `provider.tool_name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderDefinedTool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Tool declaration attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Tool {
    Function {
        #[serde(flatten)]
        function: ToolFunction,
    },
    ProviderDefined(ProviderDefinedTool),
}

impl Tool {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self::Function {
            function: ToolFunction {
                name: name.into(),
                description: Some(description.into()),
                parameters,
            },
        }
    }

    pub fn provider_defined(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ProviderDefined(ProviderDefinedTool {
            id: id.into(),
            name: name.into(),
            args: serde_json::Value::Null,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Function { function } => &function.name,
            Self::ProviderDefined(tool) => &tool.name,
        }
    }
}

/// Provider-agnostic tool choice strategy
///
/// Azure encodes `Required` and `Tool { .. }` as `"any"`; the named form
/// additionally narrows the tool list to the chosen tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide whether to call tools (default)
    #[default]
    Auto,
    /// Require the model to call at least one tool
    Required,
    /// Prevent the model from calling any tools
    None,
    /// Force the model to call a specific tool
    #[serde(rename = "tool")]
    Tool { name: String },
}

impl ToolChoice {
    pub fn tool(name: impl Into<String>) -> Self {
        Self::Tool { name: name.into() }
    }

    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Self::Tool { name } => Some(name),
            _ => None,
        }
    }
}
