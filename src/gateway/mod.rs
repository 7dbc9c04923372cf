//! Axum-based HTTP gateway for remote tool invocation.
//!
//! Every `POST /mcp` passes the access gate — API-key authentication,
//! per-client rate limiting, envelope validation — before any tool dispatch.
//! The router also applies body limits, request timeouts, CORS, hardened
//! response headers, and a top-level panic catch so faults surface as a
//! generic 500 instead of a dropped connection.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::config::{Config, Secrets};
use crate::security::{ApiKeyGuard, CommandGuard, FixedWindowLimiter};
use crate::tools::{ToolContext, ToolRegistry, default_registry};

use handlers::{handle_health, handle_info, handle_rpc};

/// Maximum request body size (64 KiB) — prevents memory exhaustion.
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s) — prevents slow-loris attacks.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub ctx: Arc<ToolContext>,
    pub auth: Arc<ApiKeyGuard>,
    pub limiter: Arc<FixedWindowLimiter>,
}

/// Build the gateway router with all security layers applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_rpc))
        .route("/mcp", get(handle_info))
        .route("/health", get(handle_health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
        .layer(CatchPanicLayer::new())
}

/// Assemble gateway state from config and environment secrets.
pub fn build_state(config: &Config, secrets: &Secrets) -> Result<AppState> {
    let workspace_root = config.workspace_root()?;
    let ctx = ToolContext::new(
        workspace_root,
        CommandGuard::new(config.allowed_commands.clone()),
        config.test_command.clone(),
    );
    Ok(AppState {
        registry: Arc::new(default_registry()),
        ctx: Arc::new(ctx),
        auth: Arc::new(ApiKeyGuard::new(
            secrets.api_key.clone(),
            secrets.dev_mode,
        )),
        limiter: Arc::new(FixedWindowLimiter::new(
            config.gateway.rate_limit_max_requests,
            Duration::from_secs(config.gateway.rate_limit_window_secs),
        )),
    })
}

fn is_public_bind(host: &str) -> bool {
    !matches!(host, "127.0.0.1" | "localhost" | "::1")
}

/// Run the HTTP gateway.
pub async fn run_gateway(config: Config, secrets: Secrets) -> Result<()> {
    let state = build_state(&config, &secrets)?;

    // Refuse to expose an unauthenticated gateway beyond loopback.
    if is_public_bind(&config.gateway.host) && state.auth.is_open() {
        anyhow::bail!(
            "refusing to bind {} without an API key — set {} or bind 127.0.0.1",
            config.gateway.host,
            crate::config::API_KEY_ENV
        );
    }
    if state.auth.is_open() {
        tracing::warn!("gateway running without an API key (explicit dev mode)");
    }

    let addr: SocketAddr = format!("{}:{}", config.gateway.host, config.gateway.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        workspace = %state.ctx.workspace_root.display(),
        "gateway listening"
    );

    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_body_limit_is_64kb() {
        assert_eq!(MAX_BODY_SIZE, 65_536);
    }

    #[test]
    fn security_timeout_is_30_seconds() {
        assert_eq!(REQUEST_TIMEOUT_SECS, 30);
    }

    #[test]
    fn loopback_hosts_are_not_public() {
        assert!(!is_public_bind("127.0.0.1"));
        assert!(!is_public_bind("localhost"));
        assert!(!is_public_bind("::1"));
        assert!(is_public_bind("0.0.0.0"));
        assert!(is_public_bind("192.168.1.5"));
    }

    #[test]
    fn build_state_uses_configured_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            workspace_dir: dir.path().to_path_buf(),
            allowed_commands: vec!["cargo".into()],
            ..Config::default()
        };
        let secrets = Secrets {
            api_key: Some("k".into()),
            dev_mode: false,
        };
        let state = build_state(&config, &secrets).unwrap();
        assert!(state.ctx.commands.validate("cargo test").is_ok());
        assert!(state.ctx.commands.validate("git status").is_err());
    }
}
