//! Tools command - lists the service's tools.

use anyhow::Result;
use clap::Args;
use console::{Style, style};

use super::Context;

/// Arguments for the tools command.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Show each tool's input schema
    #[arg(short, long)]
    pub schema: bool,
}

/// Run the tools command.
pub async fn run(args: ToolsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let tools = client.list_tools().await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    let dim = Style::new().dim();

    println!();
    println!("{}", style("Available Tools").bold());
    println!("{}", dim.apply_to("─".repeat(40)));

    if tools.is_empty() {
        println!();
        println!("  {}", dim.apply_to("(none)"));
    }

    for tool in &tools {
        println!();
        println!("  {}", style(&tool.name).cyan());
        if let Some(description) = &tool.description {
            println!("    {}", description);
        }
        if args.schema
            && let Some(schema) = &tool.input_schema
        {
            for line in serde_json::to_string_pretty(schema)?.lines() {
                println!("    {}", dim.apply_to(line));
            }
        }
    }
    println!();

    Ok(())
}
