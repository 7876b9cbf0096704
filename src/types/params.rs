//! Generation parameters and the closed set of generation modes.

use serde::{Deserialize, Serialize};

use super::tools::{Tool, ToolChoice, ToolFunction};

/// Response format hint for the model output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseFormat {
    Text,
    /// JSON output, optionally constrained by a schema.
    Json {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Sampling knobs shared by every mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CallSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    /// Not supported by Azure; produces a warning when set.
    pub top_k: Option<u32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub stop_sequences: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub response_format: Option<ResponseFormat>,
}

impl CallSettings {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_stop_sequences(mut self, stop: Vec<String>) -> Self {
        self.stop_sequences = Some(stop);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// How the model should produce its output.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationMode {
    /// Free-form generation, optionally with tools.
    Regular {
        tools: Vec<Tool>,
        tool_choice: Option<ToolChoice>,
    },
    /// Structured output through the `response_format` field.
    ObjectJson {
        schema: Option<serde_json::Value>,
        name: Option<String>,
        description: Option<String>,
    },
    /// Structured output through a single forced tool.
    ObjectTool { tool: ToolFunction },
}

impl Default for GenerationMode {
    fn default() -> Self {
        Self::Regular {
            tools: Vec::new(),
            tool_choice: None,
        }
    }
}

impl GenerationMode {
    pub fn regular() -> Self {
        Self::default()
    }

    pub fn with_tools(tools: Vec<Tool>, tool_choice: Option<ToolChoice>) -> Self {
        Self::Regular { tools, tool_choice }
    }

    pub fn object_json(schema: Option<serde_json::Value>) -> Self {
        Self::ObjectJson {
            schema,
            name: None,
            description: None,
        }
    }

    pub fn object_tool(tool: ToolFunction) -> Self {
        Self::ObjectTool { tool }
    }
}
