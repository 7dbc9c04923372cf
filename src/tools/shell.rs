use async_trait::async_trait;
use serde_json::json;

use super::common::require_str_arg;
use super::exec::run_bounded;
use super::traits::{Tool, ToolContext, ToolResult};

/// Shell command execution gated by the command allow-list.
///
/// Only the program name is validated; arguments pass through uninspected.
/// Execution bounds (timeout, output ceiling, scrubbed environment) live in
/// [`super::exec`].
pub struct ShellTool;

impl ShellTool {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ShellTool {
    fn name(&self) -> &str {
        "run_shell_command"
    }

    fn description(&self) -> &str {
        "Run an allow-listed shell command in the workspace (e.g. npm install, git pull)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> anyhow::Result<ToolResult> {
        let command = require_str_arg(&args, "command")?;

        if let Err(e) = ctx.commands.validate(command) {
            return Ok(ToolResult::failed(e.to_string()));
        }

        Ok(run_bounded(command, &ctx.workspace_root).await)
    }
}
