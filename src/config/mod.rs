pub mod schema;

pub use schema::{Config, GatewayConfig};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable carrying the shared secret for the HTTP gateway.
pub const API_KEY_ENV: &str = "MCP_API_KEY";
/// Explicit opt-in for running the gateway without a configured key.
pub const DEV_MODE_ENV: &str = "TOOLGATE_DEV_MODE";

impl Config {
    /// Load configuration from a TOML file, or defaults when the file is
    /// absent. A present-but-invalid file is an error, not a silent default.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new("toolgate.toml"));
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display()))),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(ConfigError::Io(error)),
        }
    }

    /// Canonicalize the workspace root once. Everything downstream treats the
    /// result as immutable for the process lifetime.
    pub fn workspace_root(&self) -> Result<PathBuf, ConfigError> {
        self.workspace_dir
            .canonicalize()
            .map_err(|e| ConfigError::Workspace(format!("{}: {e}", self.workspace_dir.display())))
    }
}

/// Environment-derived secrets, read once at process start. No hot reload.
#[derive(Debug, Clone)]
pub struct Secrets {
    /// Shared secret expected in the `x-mcp-api-key` header.
    pub api_key: Option<String>,
    /// Explicit non-production flag; without it an unconfigured key means
    /// every gateway request is rejected.
    pub dev_mode: bool,
}

impl Secrets {
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let dev_mode = std::env::var(DEV_MODE_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { api_key, dev_mode }
    }
}
