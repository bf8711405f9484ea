//! Tool Abstraction
//!
//! MCP-compatible tool interface: JSON-schema'd inputs, content-block
//! outputs, typed errors. Tools implement [`Tool`]; the registry executes
//! them behind validation and a per-tool timeout.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default timeout for tool execution
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// Tool execution error
#[derive(Error, Debug, Clone)]
pub enum ToolError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("{0}")]
    NotFound(String),

    #[error("tool {tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },

    #[error("execution failed: {0}")]
    Execution(String),
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        ToolError::InvalidParams(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ToolError::NotFound(message.into())
    }

    pub fn timeout(tool: impl Into<String>, secs: u64) -> Self {
        ToolError::Timeout {
            tool: tool.into(),
            secs,
        }
    }

    pub fn execution(message: impl Into<String>) -> Self {
        ToolError::Execution(message.into())
    }
}

impl From<ToolError> for car_agent_core::Error {
    fn from(err: ToolError) -> Self {
        car_agent_core::Error::Tool(err.to_string())
    }
}

/// One block of tool output content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

/// Tool execution output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,

    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    /// Plain text output
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// JSON output, carried as serialized text content
    pub fn json(value: Value) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: value.to_string(),
            }],
            is_error: false,
        }
    }

    /// Error output (the call itself succeeded, the tool reports failure)
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

/// JSON Schema for one input property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: String,

    pub description: String,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PropertySchema {
    fn new(property_type: &str, description: impl Into<String>) -> Self {
        Self {
            property_type: property_type.to_string(),
            description: description.into(),
            enum_values: None,
            default: None,
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new("string", description)
    }

    pub fn number(description: impl Into<String>) -> Self {
        Self::new("number", description)
    }

    pub fn integer(description: impl Into<String>) -> Self {
        Self::new("integer", description)
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new("boolean", description)
    }

    pub fn enum_type(description: impl Into<String>, values: Vec<String>) -> Self {
        let mut schema = Self::new("string", description);
        schema.enum_values = Some(values);
        schema
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// JSON Schema for a tool's input object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,

    pub properties: BTreeMap<String, PropertySchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl InputSchema {
    /// An empty object schema
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property, marking it required if asked
    pub fn property(
        mut self,
        name: impl Into<String>,
        schema: PropertySchema,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }
}

/// Complete tool schema, as presented to the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// An executable agent tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name
    fn name(&self) -> &str;

    /// One-line description for the agent
    fn description(&self) -> &str;

    /// Input schema
    fn schema(&self) -> ToolSchema;

    /// Validate input before execution
    ///
    /// The default implementation checks that every required property is
    /// present and non-null.
    fn validate(&self, params: &Value) -> Result<(), ToolError> {
        let schema = self.schema();
        for required in &schema.input_schema.required {
            if params.get(required).map_or(true, Value::is_null) {
                return Err(ToolError::invalid_params(format!(
                    "{} is required",
                    required
                )));
            }
        }
        Ok(())
    }

    /// Execution timeout in seconds
    fn timeout_secs(&self) -> u64 {
        DEFAULT_TOOL_TIMEOUT_SECS
    }

    /// Run the tool
    async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo a message back"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object()
                    .property("message", PropertySchema::string("Message to echo"), true)
                    .property(
                        "uppercase",
                        PropertySchema::boolean("Echo in uppercase").with_default(json!(false)),
                        false,
                    ),
            }
        }

        async fn execute(&self, params: Value) -> Result<ToolOutput, ToolError> {
            let message = params
                .get("message")
                .and_then(|v| v.as_str())
                .ok_or_else(|| ToolError::invalid_params("message is required"))?;
            let uppercase = params
                .get("uppercase")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);

            Ok(ToolOutput::text(if uppercase {
                message.to_uppercase()
            } else {
                message.to_string()
            }))
        }
    }

    #[test]
    fn test_schema_serializes_as_json_schema() {
        let schema = EchoTool.schema();
        let value = serde_json::to_value(&schema.input_schema).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "Message to echo"
                    },
                    "uppercase": {
                        "type": "boolean",
                        "description": "Echo in uppercase",
                        "default": false
                    }
                },
                "required": ["message"]
            })
        );
    }

    #[test]
    fn test_enum_property_schema() {
        let prop = PropertySchema::enum_type("Priority", vec!["low".into(), "high".into()]);
        let value = serde_json::to_value(&prop).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "string",
                "description": "Priority",
                "enum": ["low", "high"]
            })
        );
    }

    #[test]
    fn test_default_validate_checks_required() {
        let tool = EchoTool;

        assert!(tool.validate(&json!({"message": "hi"})).is_ok());
        assert!(tool.validate(&json!({})).is_err());
        // An explicit null does not satisfy a required property
        assert!(tool.validate(&json!({"message": null})).is_err());
    }

    #[test]
    fn test_tool_output_constructors() {
        let output = ToolOutput::text("hello");
        assert!(!output.is_error);

        let output = ToolOutput::json(json!({"a": 1}));
        assert!(!output.is_error);
        let ContentBlock::Text { text } = &output.content[0];
        let value: Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["a"], 1);

        let output = ToolOutput::error("boom");
        assert!(output.is_error);
    }

    #[test]
    fn test_error_messages() {
        let err = ToolError::timeout("search_cars", 30);
        assert_eq!(err.to_string(), "tool search_cars timed out after 30s");

        let err = ToolError::invalid_params("make is required");
        assert_eq!(err.to_string(), "invalid parameters: make is required");
    }

    #[tokio::test]
    async fn test_execute() {
        let tool = EchoTool;
        let output = tool.execute(json!({"message": "hola"})).await.unwrap();
        assert!(!output.is_error);
        let ContentBlock::Text { text } = &output.content[0];
        assert_eq!(text, "hola");
    }
}
