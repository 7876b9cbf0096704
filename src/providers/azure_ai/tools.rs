//! Tool declarations → Azure `tools` / `tool_choice`.

use super::types::{AzureTool, AzureToolChoice};
use crate::types::{CallWarning, Tool, ToolChoice};

/// Prepared tool fields plus any warnings for dropped tools.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedTools {
    /// `None` when no tools are declared; never `Some(vec![])` from an empty input.
    pub tools: Option<Vec<AzureTool>>,
    pub tool_choice: Option<AzureToolChoice>,
    pub warnings: Vec<CallWarning>,
}

/// Map tool declarations and the choice policy onto Azure's encoding.
pub fn prepare_tools(tools: &[Tool], tool_choice: Option<&ToolChoice>) -> PreparedTools {
    if tools.is_empty() {
        return PreparedTools::default();
    }

    let mut warnings = Vec::new();
    let mut azure_tools = Vec::with_capacity(tools.len());

    for tool in tools {
        match tool {
            Tool::Function { function } => azure_tools.push(AzureTool::function(
                function.name.clone(),
                function.description.clone(),
                function.parameters.clone(),
            )),
            Tool::ProviderDefined(provider_tool) => {
                warnings.push(CallWarning::UnsupportedTool {
                    tool_name: provider_tool.name.clone(),
                    details: Some(format!(
                        "provider-defined tool {} is not supported by Azure AI",
                        provider_tool.id
                    )),
                });
            }
        }
    }

    if azure_tools.is_empty() {
        return PreparedTools {
            warnings,
            ..Default::default()
        };
    }

    let Some(choice) = tool_choice else {
        return PreparedTools {
            tools: Some(azure_tools),
            tool_choice: None,
            warnings,
        };
    };

    let (azure_tools, azure_choice) = match choice {
        ToolChoice::Auto => (azure_tools, AzureToolChoice::Auto),
        ToolChoice::None => (azure_tools, AzureToolChoice::None),
        ToolChoice::Required => (azure_tools, AzureToolChoice::Any),
        ToolChoice::Tool { name } => {
            let filtered = azure_tools
                .into_iter()
                .filter(|t| &t.function.name == name)
                .collect();
            (filtered, AzureToolChoice::Any)
        }
    };

    PreparedTools {
        tools: Some(azure_tools),
        tool_choice: Some(azure_choice),
        warnings,
    }
}
