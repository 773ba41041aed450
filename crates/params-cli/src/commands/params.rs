//! Params command implementation

use colored::Colorize;
use params_core::Properties;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Print the merged parameters, one `key=value` per line or as JSON.
pub async fn run_params(ctx: &Context, json: bool) -> Result<()> {
    let resolution = ctx
        .orchestrator
        .resolve(&ctx.cwd, ctx.branch_override.clone())
        .await?;

    if json {
        println!("{}", to_json(&resolution.parameters)?);
        return Ok(());
    }

    if resolution.parameters.is_empty() {
        eprintln!(
            "{} no parameters found for branch {}",
            "note:".yellow(),
            resolution.branch.name.cyan()
        );
    }
    print!("{}", to_lines(&resolution.parameters));
    Ok(())
}

fn to_json(parameters: &Properties) -> Result<String> {
    serde_json::to_string_pretty(parameters).map_err(|e| CliError::user(e.to_string()))
}

fn to_lines(parameters: &Properties) -> String {
    parameters
        .iter()
        .map(|(k, v)| format!("{k}={v}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Properties {
        [("region", "eu-west-1"), ("env", "prod")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn lines_are_sorted_by_key() {
        assert_eq!(to_lines(&sample()), "env=prod\nregion=eu-west-1\n");
    }

    #[test]
    fn json_is_an_object() {
        let value: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
        assert_eq!(value["env"], "prod");
        assert_eq!(value["region"], "eu-west-1");
    }
}
