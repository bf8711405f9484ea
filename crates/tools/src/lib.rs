//! Agent tools for the car sales assistant
//!
//! Implements an MCP-compatible tool interface plus the concrete tools the
//! agent calls: catalog search, financing quotes, and car details. Tools are
//! wired through a registry that validates input and enforces timeouts.

pub mod car_tools;
pub mod mcp;
pub mod registry;

pub use car_tools::{CalculateFinancingTool, GetCarDetailsTool, SearchCarsTool};
pub use mcp::{
    ContentBlock, InputSchema, PropertySchema, Tool, ToolError, ToolOutput, ToolSchema,
    DEFAULT_TOOL_TIMEOUT_SECS,
};
pub use registry::{create_registry, ToolExecutor, ToolRegistry};
