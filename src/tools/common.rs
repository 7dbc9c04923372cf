use serde_json::json;

pub(crate) fn workspace_path_property() -> serde_json::Value {
    json!({
        "type": "string",
        "description": "Relative path within the workspace"
    })
}

pub(crate) fn require_str_arg<'a>(
    args: &'a serde_json::Value,
    name: &str,
) -> anyhow::Result<&'a str> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow::anyhow!("Missing '{name}' parameter"))
}

#[cfg(test)]
pub(crate) fn test_context(workspace: std::path::PathBuf) -> crate::tools::ToolContext {
    crate::tools::ToolContext::new(
        workspace,
        crate::security::CommandGuard::default(),
        "npm test".to_string(),
    )
}
