//! Ping command - checks that the service is usable.

use anyhow::{Result, bail};
use clap::Args;
use console::{Style, style};
use serde::Serialize;

use super::Context;

/// Arguments for the ping command.
#[derive(Args, Debug)]
pub struct PingArgs {}

/// Ping result for JSON output.
#[derive(Debug, Serialize)]
struct PingOutput {
    reachable: bool,
    server_url: String,
}

/// Run the ping command. Fails when the service is unreachable.
pub async fn run(_args: PingArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let reachable = client.test_connection().await;

    if ctx.json_output {
        let output = PingOutput {
            reachable,
            server_url: ctx.server_url.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let dim = Style::new().dim();
        let status = if reachable {
            Style::new().green().apply_to("● reachable")
        } else {
            Style::new().red().apply_to("● unreachable")
        };

        println!();
        println!("{}", style("Seeker Service").bold());
        println!("{}", dim.apply_to("─".repeat(40)));
        println!();
        println!("  {} {}", dim.apply_to("Status:"), status);
        println!("  {} {}", dim.apply_to("Server:"), ctx.server_url);
        println!("  {} {}", dim.apply_to("Endpoint:"), client.endpoint());
        println!();
    }

    if !reachable {
        bail!("service at {} is unreachable", ctx.server_url);
    }
    Ok(())
}
