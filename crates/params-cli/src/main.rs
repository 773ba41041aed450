//! infra-params CLI
//!
//! Resolves layered `.properties` parameters for the current directory
//! and applies them to deployment descriptors.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::ApplyTarget;
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.global.verbose).map_err(|e| CliError::user(e.to_string()))?;
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let ctx = Context::new(&cwd, &cli.global)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(execute_command(&ctx, cli.command))
}

async fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Params { json } => commands::run_params(ctx, json).await,
        Commands::Chain { files } => commands::run_chain(ctx, files).await,
        Commands::Apply {
            descriptor,
            output,
            diff,
        } => {
            let target = match (output, diff) {
                (Some(path), _) => ApplyTarget::File(path),
                (None, true) => ApplyTarget::Diff,
                (None, false) => ApplyTarget::Stdout,
            };
            commands::run_apply(ctx, &descriptor, target).await
        }
        Commands::Settings => commands::run_settings(ctx.settings()),
    }
}
