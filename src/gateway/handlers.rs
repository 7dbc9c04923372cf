use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::Value;

use super::AppState;
use crate::security::rate_limit::client_id;
use crate::transport::{self, validate_envelope};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-mcp-api-key";

/// POST /mcp — the access gate, then tool dispatch.
///
/// Per-call state machine: authenticate → rate-check → validate envelope →
/// dispatch. Each rejection short-circuits before any tool logic runs.
pub(super) async fn handle_rpc(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    // ── Authentication ──
    let supplied = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if !state.auth.check(supplied) {
        tracing::warn!("gateway request rejected: invalid or missing API key");
        let err = serde_json::json!({"error": "Unauthorized - invalid or missing API key"});
        return (StatusCode::UNAUTHORIZED, Json(err));
    }

    // ── Rate limiting (hashed client identity, never the raw address) ──
    let client = client_id(&forwarded_address(&headers, peer));
    if !state.limiter.check_and_record(&client) {
        tracing::warn!(client = %client, "gateway request rejected: rate limit exceeded");
        let err = serde_json::json!({"error": "Rate limit exceeded"});
        return (StatusCode::TOO_MANY_REQUESTS, Json(err));
    }

    // ── Structural validation ──
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            let err = serde_json::json!({"error": "Invalid request body"});
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };
    let request = match validate_envelope(&value) {
        Ok(request) => request,
        Err(reason) => {
            let err = serde_json::json!({"error": format!("Invalid JSON-RPC request: {reason}")});
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    tracing::info!(method = %request.method, client = %client, "mcp request");

    // ── Dispatch ──
    let response = transport::dispatch(&state.registry, &state.ctx, request).await;
    match serde_json::to_value(&response) {
        Ok(value) => (StatusCode::OK, Json(value)),
        Err(e) => {
            // Response serialization failing is a server bug; report it
            // generically without the detail.
            tracing::error!(error = %e, "failed to serialize rpc response");
            let err = serde_json::json!({"error": "Internal server error"});
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err))
        }
    }
}

/// GET /mcp — basic server info, always public, no secrets.
pub(super) async fn handle_info(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "name": "toolgate",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoint": "/mcp",
        "methods": ["POST"],
        "authentication": format!("API key required ({API_KEY_HEADER} header)"),
        "tools": state.registry.tool_names(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /health — liveness probe.
pub(super) async fn handle_health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// First entry of `x-forwarded-for` when the gateway sits behind a proxy,
/// else the peer socket's IP, so direct callers get per-address buckets.
fn forwarded_address(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "198.51.100.7:54321".parse().unwrap()
    }

    #[test]
    fn forwarded_address_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(forwarded_address(&headers, peer()), "203.0.113.9");
    }

    #[test]
    fn forwarded_address_falls_back_to_peer_ip() {
        assert_eq!(forwarded_address(&HeaderMap::new(), peer()), "198.51.100.7");
    }

    #[test]
    fn forwarded_address_ignores_empty_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(forwarded_address(&headers, peer()), "198.51.100.7");
    }

    #[test]
    fn peer_port_does_not_change_identity() {
        let a: SocketAddr = "198.51.100.7:1000".parse().unwrap();
        let b: SocketAddr = "198.51.100.7:2000".parse().unwrap();
        assert_eq!(
            forwarded_address(&HeaderMap::new(), a),
            forwarded_address(&HeaderMap::new(), b)
        );
    }
}
