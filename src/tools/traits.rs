use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::security::{CommandGuard, PathGuard};

/// Result of a tool execution.
///
/// Every tool converts its own faults into `success: false` — no error
/// crosses the tool boundary, so the transport layers never special-case
/// individual tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(message.into()),
        }
    }
}

/// Description of a tool for protocol discovery (`tools/list`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Shared state every tool executes against: the fixed workspace root and
/// the two guards. Built once at startup from config.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub workspace_root: PathBuf,
    pub paths: PathGuard,
    pub commands: CommandGuard,
    pub test_command: String,
}

impl ToolContext {
    pub fn new(workspace_root: PathBuf, commands: CommandGuard, test_command: String) -> Self {
        let paths = PathGuard::new(workspace_root.clone());
        Self {
            workspace_root,
            paths,
            commands,
            test_command,
        }
    }
}

/// Core tool trait — implement for any workspace capability.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Wire name (used in `tools/call`).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON schema for parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with given arguments.
    async fn execute(&self, args: serde_json::Value, ctx: &ToolContext)
    -> anyhow::Result<ToolResult>;

    /// Full spec for protocol registration.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.parameters_schema(),
        }
    }
}
