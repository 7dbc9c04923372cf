pub mod protocol;
pub mod stdio;

pub use protocol::{RpcError, RpcRequest, RpcResponse, validate_envelope};

use serde_json::{Value, json};

use crate::tools::{ToolContext, ToolRegistry, ToolResult};

/// Dispatch a validated request to the tool layer. Shared by the stdio
/// channel and the HTTP gateway so both transports behave identically.
pub async fn dispatch(
    registry: &ToolRegistry,
    ctx: &ToolContext,
    request: RpcRequest,
) -> RpcResponse {
    let id = request.id.unwrap_or(Value::Null);

    match request.method.as_str() {
        "initialize" => RpcResponse::ok(
            id,
            json!({
                "protocolVersion": protocol::PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": "toolgate",
                    "version": env!("CARGO_PKG_VERSION"),
                },
            }),
        ),
        "tools/list" => RpcResponse::ok(id, json!({ "tools": registry.specs() })),
        "tools/call" => {
            let params = request.params.unwrap_or_else(|| json!({}));
            let Some(name) = params.get("name").and_then(Value::as_str) else {
                return RpcResponse::err(
                    id,
                    RpcError::invalid_params("tools/call requires a string 'name'"),
                );
            };
            let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

            let result = registry.execute(name, arguments, ctx).await;
            RpcResponse::ok(id, tool_result_payload(&result))
        }
        other => RpcResponse::err(id, RpcError::method_not_found(other)),
    }
}

/// Uniform `tools/call` payload: a text content block plus an error marker.
fn tool_result_payload(result: &ToolResult) -> Value {
    let text = if result.success {
        result.output.clone()
    } else {
        result
            .error
            .clone()
            .unwrap_or_else(|| "tool execution failed".to_string())
    };
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": !result.success,
    })
}
