//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// infra-params - Resolve layered properties and apply them to descriptors
#[derive(Parser, Debug)]
#[command(name = "infra-params")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file merged over the global settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Branch name to use instead of asking version control
    #[arg(short, long, global = true)]
    pub branch: Option<String>,

    /// Stop the chain at the nearest root-override file
    #[arg(long, global = true)]
    pub root_override: bool,

    /// Walk to the filesystem root instead of the repository top level
    #[arg(long, global = true)]
    pub no_vcs: bool,

    /// Version-control backend
    #[arg(long, global = true, value_enum, default_value_t = Backend::Git)]
    pub backend: Backend,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Run the `git` executable
    Git,
    /// Read the repository in-process
    Libgit,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the merged parameters for the current directory
    Params {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the directories that are searched
    Chain {
        /// Also list the property files that were loaded
        #[arg(long)]
        files: bool,
    },

    /// Substitute parameters into a descriptor
    ///
    /// Examples:
    ///   infra-params apply serverless.yml             # Print the result
    ///   infra-params apply serverless.yml -o out.yml  # Write it to a file
    ///   infra-params apply serverless.yml --diff      # Show what would change
    Apply {
        /// JSON or YAML descriptor
        descriptor: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "FILE", conflicts_with = "diff")]
        output: Option<PathBuf>,

        /// Print a unified diff instead of the result
        #[arg(long)]
        diff: bool,
    },

    /// Print the effective settings as TOML
    Settings,
}
