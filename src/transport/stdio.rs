//! Local process-to-process channel: newline-delimited JSON-RPC on
//! stdin/stdout.
//!
//! Stdout carries protocol frames only; all logging goes to stderr via
//! `tracing` so the channel stays parseable.

use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::protocol::{RpcError, RpcResponse, validate_envelope};
use crate::tools::{ToolContext, ToolRegistry};

/// Serve the tool set over stdin/stdout until stdin closes.
pub async fn serve(registry: &ToolRegistry, ctx: &ToolContext) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    tracing::info!(tools = registry.tool_names().len(), "stdio channel ready");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(response) = handle_line(registry, ctx, &line).await else {
            continue;
        };
        let framed = serde_json::to_string(&response)?;
        stdout.write_all(framed.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down stdio channel");
    Ok(())
}

/// Handle one frame. Returns `None` for notifications, which take no
/// response.
async fn handle_line(registry: &ToolRegistry, ctx: &ToolContext, line: &str) -> Option<RpcResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            return Some(RpcResponse::err(
                Value::Null,
                RpcError::parse_error(e.to_string()),
            ));
        }
    };

    let request = match validate_envelope(&value) {
        Ok(request) => request,
        Err(reason) => {
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            return Some(RpcResponse::err(id, RpcError::invalid_request(reason)));
        }
    };

    if request.id.is_none() && request.method.starts_with("notifications/") {
        return None;
    }

    tracing::debug!(method = %request.method, "dispatching stdio request");
    Some(super::dispatch(registry, ctx, request).await)
}
