use async_trait::async_trait;
use serde_json::json;

use super::common::require_str_arg;
use super::traits::{Tool, ToolContext, ToolResult};

/// Fixed hand-off file the local coding agent polls for prompts.
const HANDOFF_FILE: &str = "augment-prompt.txt";

/// Hand a prompt off to the local coding agent by writing it to a fixed file
/// in the workspace root.
///
/// The file name is fixed, but the write still routes through the path guard
/// so this tool can never become an unguarded write primitive if the
/// hand-off location is ever made configurable.
pub struct AugmentPromptTool;

impl AugmentPromptTool {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for AugmentPromptTool {
    fn name(&self) -> &str {
        "run_augment_prompt"
    }

    fn description(&self) -> &str {
        "Send a prompt to the local coding agent via the workspace hand-off file"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "Prompt text for the coding agent"
                }
            },
            "required": ["prompt"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> anyhow::Result<ToolResult> {
        let prompt = require_str_arg(&args, "prompt")?;

        let resolved = match ctx.paths.resolve(HANDOFF_FILE) {
            Ok(resolved) => resolved,
            Err(e) => return Ok(ToolResult::failed(e.to_string())),
        };

        match tokio::fs::write(&resolved, prompt).await {
            Ok(()) => Ok(ToolResult::ok("Prompt handed off to the coding agent")),
            Err(e) => Ok(ToolResult::failed(format!(
                "Failed to hand off prompt: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::common::test_context;

    #[tokio::test]
    async fn writes_prompt_to_handoff_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = AugmentPromptTool::new()
            .execute(json!({"prompt": "refactor the parser"}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(HANDOFF_FILE)).unwrap(),
            "refactor the parser"
        );
    }

    #[tokio::test]
    async fn overwrites_previous_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());
        let tool = AugmentPromptTool::new();

        tool.execute(json!({"prompt": "first"}), &ctx).await.unwrap();
        tool.execute(json!({"prompt": "second"}), &ctx).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join(HANDOFF_FILE)).unwrap(),
            "second"
        );
    }

    #[tokio::test]
    async fn missing_prompt_param_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());
        assert!(
            AugmentPromptTool::new()
                .execute(json!({}), &ctx)
                .await
                .is_err()
        );
    }
}
