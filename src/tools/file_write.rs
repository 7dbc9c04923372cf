use async_trait::async_trait;
use serde_json::json;

use super::common::{require_str_arg, workspace_path_property};
use super::traits::{Tool, ToolContext, ToolResult};

/// Write file contents with path containment.
///
/// Writes are not transactional: a write that fails midway can leave a
/// partially-written file behind. Callers re-write to recover.
pub struct FileWriteTool;

impl FileWriteTool {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for FileWriteTool {
    fn name(&self) -> &str {
        "write_project_file"
    }

    fn description(&self) -> &str {
        "Write contents to a file in the project workspace"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "path": workspace_path_property(),
                "content": {
                    "type": "string",
                    "description": "Content to write to the file"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> anyhow::Result<ToolResult> {
        let path = require_str_arg(&args, "path")?;
        let content = require_str_arg(&args, "content")?;

        let resolved = match ctx.paths.resolve(path) {
            Ok(resolved) => resolved,
            Err(e) => return Ok(ToolResult::failed(e.to_string())),
        };

        if let Some(parent) = resolved.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            return Ok(ToolResult::failed(format!(
                "Failed to create parent directory: {e}"
            )));
        }

        match tokio::fs::write(&resolved, content).await {
            Ok(()) => Ok(ToolResult::ok(format!(
                "File written: {path} ({} bytes)",
                content.len()
            ))),
            Err(e) => Ok(ToolResult::failed(format!("File write error: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::common::test_context;

    #[test]
    fn schema_requires_path_and_content() {
        let schema = FileWriteTool::new().parameters_schema();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("path")));
        assert!(required.contains(&json!("content")));
    }

    #[tokio::test]
    async fn writes_file_and_echoes_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = FileWriteTool::new()
            .execute(json!({"path": "out.txt", "content": "data"}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.contains("out.txt"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "data"
        );
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = FileWriteTool::new()
            .execute(json!({"path": "nested/deep/a.txt", "content": "hi"}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("nested/deep/a.txt")).unwrap(),
            "hi"
        );
    }

    #[tokio::test]
    async fn traversal_is_blocked() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = FileWriteTool::new()
            .execute(json!({"path": "../escape.txt", "content": "x"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn missing_content_param_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());
        let result = FileWriteTool::new()
            .execute(json!({"path": "a.txt"}), &ctx)
            .await;
        assert!(result.is_err());
    }
}
