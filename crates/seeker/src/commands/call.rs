//! Call command - invokes an arbitrary remote tool.

use anyhow::{Result, bail};
use clap::Args;
use serde_json::{Map, Value};

use super::Context;
use crate::render::render_results;

/// Arguments for the call command.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(short, long, default_value = "{}")]
    pub args: String,
}

/// Run the call command.
pub async fn run(args: CallArgs, ctx: &Context) -> Result<()> {
    let arguments = parse_arguments(&args.args)?;
    let client = ctx.client()?;

    let records = client.invoke_tool(&args.tool, arguments).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_results(&records));
    }

    Ok(())
}

fn parse_arguments(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("--args is not valid JSON: {}", e))?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("--args must be a JSON object, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let map = parse_arguments(r#"{"id": 42, "tags": ["a"]}"#).unwrap();
        assert_eq!(map["id"], 42);
        assert!(parse_arguments("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_arguments_rejects_non_objects() {
        let err = parse_arguments("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));

        let err = parse_arguments("{oops").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
