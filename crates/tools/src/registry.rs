//! Tool Registry
//!
//! Manages tool registration, discovery, and execution. Execution goes
//! through validation and a per-tool timeout so one stuck tool cannot hang
//! the agent turn.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use car_agent_catalog::CarSearchService;
use car_agent_core::CatalogRepository;
use car_agent_financing::FinancingEngine;

use crate::car_tools::{CalculateFinancingTool, GetCarDetailsTool, SearchCarsTool};
use crate::mcp::{Tool, ToolError, ToolOutput, ToolSchema};

/// Tool executor trait
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Register a boxed tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Remove a tool
    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.remove(name)
    }

    /// Get number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    /// Execute a tool with timeout protection
    async fn execute(&self, name: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(format!("Tool not found: {}", name)))?;

        tool.validate(&arguments)?;

        let timeout_secs = tool.timeout_secs();
        let timeout_duration = Duration::from_secs(timeout_secs);

        tracing::trace!(
            tool = name,
            timeout_secs = timeout_secs,
            "Executing tool with timeout"
        );

        match tokio::time::timeout(timeout_duration, tool.execute(arguments)).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(err)) => {
                tracing::warn!(tool = name, error = %err, "Tool execution failed");
                Err(err)
            }
            Err(_elapsed) => {
                tracing::warn!(tool = name, timeout_secs, "Tool execution timed out");
                Err(ToolError::timeout(name, timeout_secs))
            }
        }
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.tools.get(name).map(|t| t.schema())
    }
}

/// Create the standard car agent registry
///
/// Registers the catalog and financing tools against the given services.
pub fn create_registry(
    search: Arc<CarSearchService>,
    engine: FinancingEngine,
    repo: Arc<dyn CatalogRepository>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(SearchCarsTool::new(search.clone()));
    registry.register(CalculateFinancingTool::new(engine, repo));
    registry.register(GetCarDetailsTool::new(search));

    tracing::info!(tools = registry.len(), "Created car agent tool registry");

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::{InputSchema, PropertySchema};
    use serde_json::json;

    struct PingTool;

    #[async_trait]
    impl Tool for PingTool {
        fn name(&self) -> &str {
            "ping"
        }

        fn description(&self) -> &str {
            "Reply with pong"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object().property(
                    "token",
                    PropertySchema::string("Token to echo"),
                    true,
                ),
            }
        }

        async fn execute(&self, _params: Value) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::text("pong"))
        }
    }

    struct StuckTool;

    #[async_trait]
    impl Tool for StuckTool {
        fn name(&self) -> &str {
            "stuck"
        }

        fn description(&self) -> &str {
            "Never finishes"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                input_schema: InputSchema::object(),
            }
        }

        fn timeout_secs(&self) -> u64 {
            0
        }

        async fn execute(&self, _params: Value) -> Result<ToolOutput, ToolError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(ToolOutput::text("never"))
        }
    }

    #[test]
    fn test_registry_basic() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(PingTool);
        assert_eq!(registry.len(), 1);
        assert!(registry.has("ping"));
        assert!(!registry.has("pong"));

        assert!(registry.remove("ping").is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_list_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(PingTool);

        let tools = registry.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "ping");

        assert!(registry.get_tool("ping").is_some());
        assert!(registry.get_tool("missing").is_none());
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.execute("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_execute_validates_before_running() {
        let mut registry = ToolRegistry::new();
        registry.register(PingTool);

        let err = registry.execute("ping", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));

        let output = registry
            .execute("ping", json!({"token": "abc"}))
            .await
            .unwrap();
        assert!(!output.is_error);
    }

    #[tokio::test]
    async fn test_execute_times_out() {
        let mut registry = ToolRegistry::new();
        registry.register(StuckTool);

        let err = registry.execute("stuck", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
    }
}
