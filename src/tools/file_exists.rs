use async_trait::async_trait;
use serde_json::json;

use super::common::{require_str_arg, workspace_path_property};
use super::traits::{Tool, ToolContext, ToolResult};

/// Check file existence with path containment.
pub struct FileExistsTool;

impl FileExistsTool {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for FileExistsTool {
    fn name(&self) -> &str {
        "check_file_exists"
    }

    fn description(&self) -> &str {
        "Check whether a file exists in the project workspace"
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

        match tokio::fs::try_exists(&resolved).await {
            Ok(true) => Ok(ToolResult::ok("File exists")),
            Ok(false) => Ok(ToolResult::ok("File does not exist")),
            Err(e) => Ok(ToolResult::failed(format!("File check error: {e}"))),
        }
    }
}
