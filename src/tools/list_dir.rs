use async_trait::async_trait;
use serde_json::json;

use super::common::require_str_arg;
use super::traits::{Tool, ToolContext, ToolResult};

/// Substrings that mark an entry as credential-like. Entries matching any of
/// these are dropped from listings even when the directory itself is
/// in-bounds.
const SENSITIVE_SUBSTRINGS: &[&str] = &["secret", "key", "password"];

fn is_sensitive_entry(name: &str) -> bool {
    name.starts_with(".env")
        || SENSITIVE_SUBSTRINGS
            .iter()
            .any(|needle| name.contains(needle))
}

/// List directory entries with path containment and credential-name
/// filtering.
pub struct ListDirTool;

impl ListDirTool {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListDirTool {
    fn name(&self) -> &str {
        "list_directory_files"
    }

    fn description(&self) -> &str {
        "List files in a workspace directory"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "dir": {
                    "type": "string",
                    "description": "Relative directory path within the workspace"
                }
            },
            "required": ["dir"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext,
    ) -> anyhow::Result<ToolResult> {
        let dir = require_str_arg(&args, "dir")?;

        let resolved = match ctx.paths.resolve(dir) {
            Ok(resolved) => resolved,
            Err(e) => return Ok(ToolResult::failed(e.to_string())),
        };

        let mut entries = match tokio::fs::read_dir(&resolved).await {
            Ok(entries) => entries,
            Err(e) => return Ok(ToolResult::failed(format!("Directory read error: {e}"))),
        };

        let mut names = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    if !is_sensitive_entry(&name) {
                        names.push(name);
                    }
                }
                Ok(None) => break,
                Err(e) => return Ok(ToolResult::failed(format!("Directory read error: {e}"))),
            }
        }
        names.sort_unstable();

        match serde_json::to_string_pretty(&names) {
            Ok(listing) => Ok(ToolResult::ok(listing)),
            Err(e) => Ok(ToolResult::failed(format!("Directory read error: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::common::test_context;

    #[test]
    fn sensitive_names_are_detected() {
        assert!(is_sensitive_entry(".env"));
        assert!(is_sensitive_entry(".env.local"));
        assert!(is_sensitive_entry("secret.txt"));
        assert!(is_sensitive_entry("api_keys.json"));
        assert!(is_sensitive_entry("password-list"));
        assert!(!is_sensitive_entry("notes.md"));
        assert!(!is_sensitive_entry("environment.md"));
    }

    #[test]
    fn sensitive_match_is_case_sensitive() {
        assert!(!is_sensitive_entry("SECRET.txt"));
        assert!(!is_sensitive_entry("KeyBindings.json"));
    }

    #[tokio::test]
    async fn filters_credential_like_entries() {
        let dir = tempfile::tempdir().unwrap();
        for name in [".env.local", "secret.txt", "notes.md"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = ListDirTool::new()
            .execute(json!({"dir": ""}), &ctx)
            .await
            .unwrap();
        assert!(result.success);
        let names: Vec<String> = serde_json::from_str(&result.output).unwrap();
        assert_eq!(names, vec!["notes.md".to_string()]);
    }

    #[tokio::test]
    async fn listing_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "c.txt"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = ListDirTool::new()
            .execute(json!({"dir": ""}), &ctx)
            .await
            .unwrap();
        let names: Vec<String> = serde_json::from_str(&result.output).unwrap();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn missing_directory_is_a_failed_result() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = ListDirTool::new()
            .execute(json!({"dir": "no-such-dir"}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Directory read error"));
    }

    #[tokio::test]
    async fn traversal_is_blocked() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path().canonicalize().unwrap());

        let result = ListDirTool::new()
            .execute(json!({"dir": "../.."}), &ctx)
            .await
            .unwrap();
        assert!(!result.success);
    }
}
