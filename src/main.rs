use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use toolgate::config::{Config, Secrets};
use toolgate::security::CommandGuard;
use toolgate::tools::{ToolContext, default_registry};

#[derive(Parser)]
#[command(
    name = "toolgate",
    version,
    about = "Security-gated workspace tool server for AI coding assistants"
)]
struct Cli {
    /// Path to toolgate.toml (defaults to ./toolgate.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workspace root, overriding the config file
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the tool set over stdin/stdout (local channel)
    Serve,
    /// Serve the tool set over HTTP with API-key auth and rate limiting
    Gateway {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr: stdout belongs to the stdio protocol channel.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(workspace) = cli.workspace {
        config.workspace_dir = workspace;
    }
    let secrets = Secrets::from_env();

    match cli.command {
        Command::Serve => {
            let ctx = ToolContext::new(
                config.workspace_root()?,
                CommandGuard::new(config.allowed_commands.clone()),
                config.test_command.clone(),
            );
            let registry = default_registry();
            toolgate::transport::stdio::serve(&registry, &ctx).await
        }
        Command::Gateway { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            toolgate::gateway::run_gateway(config, secrets).await
        }
    }
}
