//! Search command - runs the remote search tool.

use anyhow::Result;
use clap::Args;
use console::Style;
use seeker_client::DEFAULT_SEARCH_TYPE;

use super::Context;
use crate::render::render_results;

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Search strategy understood by the service (e.g. hybrid, semantic, keyword)
    #[arg(short = 't', long = "type", default_value = DEFAULT_SEARCH_TYPE)]
    pub search_type: String,
}

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let query = args.query.join(" ");
    let client = ctx.client()?;

    let records = client.search_with_type(&query, &args.search_type).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    print!("{}", render_results(&records));
    if ctx.verbose {
        println!();
        println!(
            "{}",
            dim.apply_to(format!(
                "{} result(s) for '{}' ({})",
                records.len(),
                query,
                args.search_type
            ))
        );
    }

    Ok(())
}
