//! Active branch resolution

use std::fmt;

use params_fs::NormalizedPath;
use params_git::VcsQuery;

use crate::{Error, Result};

/// Where the branch name came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchSource {
    /// Supplied explicitly (environment variable or flag)
    Override,
    /// Reported by the named version-control backend
    Discovered { backend: String },
}

impl fmt::Display for BranchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => f.write_str("override"),
            Self::Discovered { backend } => write!(f, "{backend}"),
        }
    }
}

/// A resolved branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub source: BranchSource,
}

/// Resolves the active branch, preferring an explicit override.
pub struct BranchResolver<'a> {
    vcs: &'a dyn VcsQuery,
    override_value: Option<String>,
}

impl<'a> BranchResolver<'a> {
    /// An empty override counts as no override.
    pub fn new(vcs: &'a dyn VcsQuery, override_value: Option<String>) -> Self {
        Self {
            vcs,
            override_value: override_value.filter(|v| !v.is_empty()),
        }
    }

    /// Return the override if present, otherwise ask version control.
    ///
    /// No process is started when an override is set.
    pub async fn resolve(&self, cwd: &NormalizedPath) -> Result<Branch> {
        if let Some(name) = &self.override_value {
            tracing::info!(branch = %name, "Using branch override");
            return Ok(Branch {
                name: name.clone(),
                source: BranchSource::Override,
            });
        }

        let name = self
            .vcs
            .current_branch(cwd)
            .await
            .map_err(|source| Error::BranchResolution { source })?;
        tracing::info!(branch = %name, backend = self.vcs.name(), "Discovered branch");

        Ok(Branch {
            name,
            source: BranchSource::Discovered {
                backend: self.vcs.name().to_string(),
            },
        })
    }
}

/// Read a branch override from the environment variable `var`.
///
/// Unset and empty variables both yield `None`.
pub fn override_from_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}
