use async_trait::async_trait;
use serde_json::json;

use super::common::{require_str_arg, workspace_path_property};
use super::traits::{Tool, ToolContext, ToolResult};

/// Read file contents with path containment.
pub struct FileReadTool;

impl FileReadTool {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &str {
        "read_project_file"
    }

    fn description(&self) -> &str {
        "Read a file from the project workspace"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": workspace_path_property()
            },
            "required": ["path"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> anyhow::Result<ToolResult> {
        let path = require_str_arg(&args, "path")?;

        let resolved = match ctx.paths.resolve(path) {
            Ok(resolved) => resolved,
            Err(e) => return Ok(ToolResult::failed(e.to_string())),
        };

        match tokio::fs::read_to_string(&resolved).await {
            Ok(content) => Ok(ToolResult::ok(content)),
            Err(e) => Ok(ToolResult::failed(format!("File read error: {e}"))),
        }
    }
}
