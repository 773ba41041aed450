//! Invocation context
//!
//! Gathers everything a command needs from the process: the working
//! directory, merged settings, the branch override and the chosen
//! version-control backend. Nothing below this module reads the
//! environment.

use std::path::Path;

use params_core::{ChainMode, Orchestrator, Settings, SettingsResolver, override_from_env};
use params_fs::NormalizedPath;
use params_git::{GitCli, LibGit, VcsQuery};

use crate::cli::{Backend, GlobalArgs};
use crate::error::Result;

pub struct Context {
    pub cwd: NormalizedPath,
    pub orchestrator: Orchestrator,
    pub branch_override: Option<String>,
}

impl Context {
    /// Build the context for `cwd` from the global flags.
    pub fn new(cwd: &Path, args: &GlobalArgs) -> Result<Self> {
        let settings = load_settings(args)?;

        let branch_override = args
            .branch
            .clone()
            .filter(|b| !b.is_empty())
            .or_else(|| override_from_env(&settings.branch_env_var));

        let vcs: Box<dyn VcsQuery> = match args.backend {
            Backend::Git => Box::new(GitCli::new()),
            Backend::Libgit => Box::new(LibGit::new()),
        };
        let chain_mode = if args.no_vcs {
            ChainMode::FilesystemRoot
        } else {
            ChainMode::Repository
        };

        let cwd = NormalizedPath::canonicalize(cwd)?;
        tracing::debug!(%cwd, backend = vcs.name(), ?chain_mode, "Invocation context");

        Ok(Self {
            cwd,
            orchestrator: Orchestrator::new(settings, vcs).with_chain_mode(chain_mode),
            branch_override,
        })
    }

    pub fn settings(&self) -> &Settings {
        self.orchestrator.settings()
    }
}

/// Merge the settings hierarchy and apply flag overrides.
fn load_settings(args: &GlobalArgs) -> Result<Settings> {
    let mut resolver = SettingsResolver::new();
    if let Some(path) = &args.config {
        resolver = resolver.with_file(path);
    }
    let mut settings = resolver.resolve()?;
    if args.root_override {
        settings.root_override = true;
    }
    Ok(settings)
}
