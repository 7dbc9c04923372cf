use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::security::command::DEFAULT_ALLOWED_COMMANDS;

/// On-disk configuration (`toolgate.toml`).
///
/// Secrets never live here: the API key and the dev-mode flag come from the
/// environment (see [`super::Secrets`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory tree all file operations are contained to. Canonicalized
    /// once at startup; immutable for the process lifetime.
    pub workspace_dir: PathBuf,

    /// Executables `run_shell_command` may invoke. Explicit allow-list.
    pub allowed_commands: Vec<String>,

    /// Fixed command for `run_project_tests`.
    pub test_command: String,

    pub gateway: GatewayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::from("."),
            allowed_commands: DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(ToString::to_string)
                .collect(),
            test_command: "npm test".to_string(),
            gateway: GatewayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Request ceiling per rate-limit window.
    pub rate_limit_max_requests: u32,
    /// Rate-limit window length in seconds.
    pub rate_limit_window_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3971,
            rate_limit_max_requests: 100,
            rate_limit_window_secs: 60,
        }
    }
}
