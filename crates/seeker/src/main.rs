//! Seeker - command-line client for the Seeker search service
//!
//! Main entry point for the Seeker CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod prompt;
mod render;

use commands::{auth, call, ping, search, tools};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Seeker - search and tool calls against a remote Seeker service
#[derive(Parser)]
#[command(name = "seeker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Service base URL (default: from config.toml, else http://localhost:8000)
    #[arg(long, global = true, env = "SEEKER_SERVER_URL")]
    pub server: Option<String>,

    /// Access token to use when none is stored (skips the interactive prompt)
    #[arg(long, global = true, env = "SEEKER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the index
    Search(search::SearchArgs),

    /// Invoke a remote tool by name
    Call(call::CallArgs),

    /// List the tools the service exposes
    Tools(tools::ToolsArgs),

    /// Check whether the service is reachable
    Ping(ping::PingArgs),

    /// Authentication management
    Auth(auth::AuthArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "seeker=debug,seeker_client=debug,seeker_auth=debug,seeker_config=debug,info"
    } else {
        "seeker=info,seeker_client=warn,seeker_auth=info,seeker_config=warn,error"
    };

    let log_dir = seeker_config::log_dir();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "seeker.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "seeker=debug,seeker_client=debug,seeker_auth=debug,seeker_config=debug,info",
                )),
        )
        .init();

    let config = seeker_config::load_config(None)?;
    let server_url = seeker_config::resolve_base_url(cli.server.as_deref(), &config);

    let ctx = commands::Context {
        server_url,
        timeout: std::time::Duration::from_secs(config.service.timeout_secs()),
        token: cli.token,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    tracing::debug!(server = %ctx.server_url, "starting");

    match cli.command {
        Commands::Search(args) => search::run(args, &ctx).await,
        Commands::Call(args) => call::run(args, &ctx).await,
        Commands::Tools(args) => tools::run(args, &ctx).await,
        Commands::Ping(args) => ping::run(args, &ctx).await,
        Commands::Auth(args) => auth::run(args, &ctx).await,
    }
}
