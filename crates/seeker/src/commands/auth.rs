//! Auth command - credential management.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::Context;

/// Arguments for the auth command.
#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Store an access token (prompts unless --token is given)
    Login,

    /// Show authentication status
    Status,

    /// Remove the stored access token
    Logout,
}

/// Auth status for JSON output.
#[derive(Debug, Serialize)]
struct AuthStatusOutput {
    authenticated: bool,
    expires_at: Option<String>,
    expires_in_secs: Option<u64>,
}

/// Run the auth command.
pub async fn run(args: AuthArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthCommand::Login => cmd_login(ctx).await,
        AuthCommand::Status => cmd_status(ctx).await,
        AuthCommand::Logout => cmd_logout(ctx).await,
    }
}

async fn cmd_login(ctx: &Context) -> Result<()> {
    let tokens = ctx.token_manager()?;

    if let Some(info) = tokens.token_info().await?
        && !info.is_expired
    {
        println!(
            "Already authenticated (expires in {})",
            info.expires_in_display()
        );
        println!("Run 'seeker auth logout' first to re-authenticate.");
        return Ok(());
    }

    tokens.acquire().await?;

    println!("Authentication successful!");
    if let Some(info) = tokens.token_info().await? {
        println!("Token expires in: {}", info.expires_in_display());
    }

    Ok(())
}

async fn cmd_status(ctx: &Context) -> Result<()> {
    let tokens = ctx.token_manager()?;
    let info = tokens.token_info().await?;

    if ctx.json_output {
        let output = AuthStatusOutput {
            authenticated: info.as_ref().is_some_and(|i| !i.is_expired),
            expires_at: info.as_ref().and_then(|i| i.expires_at_display()),
            expires_in_secs: info.as_ref().map(|i| i.expires_in_secs),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Authentication Status");
    println!("---------------------");

    match info {
        Some(info) if !info.is_expired => {
            println!("Token: stored");
            println!("  Expires: {}", info.expires_in_display());
            if let Some(at) = info.expires_at_display() {
                println!("  Expires at: {}", at);
            }
        }
        Some(info) => {
            println!("Token: {}", info.expires_in_display());
        }
        None => {
            println!("Token: not authenticated");
            println!("  Run 'seeker auth login' to store an access token");
        }
    }

    if ctx.verbose
        && let Some(path) = seeker_config::credentials_path()
    {
        println!();
        println!("Credentials file: {}", path.display());
    }

    Ok(())
}

async fn cmd_logout(ctx: &Context) -> Result<()> {
    let tokens = ctx.token_manager()?;
    let had_token = tokens.token_info().await?.is_some();

    tokens.clear().await?;

    if had_token {
        println!("Access token removed.");
    } else {
        println!("No stored access token found.");
    }

    Ok(())
}
