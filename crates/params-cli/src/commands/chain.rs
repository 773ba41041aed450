//! Chain command implementation

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Print the searched directories, ancestor first.
///
/// With `files`, the full resolution runs and every contributing property
/// file is listed under its layer.
pub async fn run_chain(ctx: &Context, files: bool) -> Result<()> {
    if !files {
        let (chain, boundary) = ctx.orchestrator.resolve_chain(&ctx.cwd).await?;
        for dir in &chain {
            println!("{dir}");
        }
        if let Some(boundary) = boundary {
            eprintln!("{} {}", "override boundary:".dimmed(), boundary);
        }
        return Ok(());
    }

    let resolution = ctx
        .orchestrator
        .resolve(&ctx.cwd, ctx.branch_override.clone())
        .await?;

    for dir in &resolution.chain {
        println!("{dir}");
    }
    println!();
    println!(
        "{} {} ({})",
        "Branch:".bold(),
        resolution.branch.name.cyan(),
        resolution.branch.source
    );
    for (kind, source) in resolution.sources() {
        println!("  {} {:<13} {}", "+".green(), kind.as_str(), source);
    }
    if resolution.sources().next().is_none() {
        println!("  {}", "No property files found".dimmed());
    }
    Ok(())
}
