//! `git` subprocess backend

use std::process::Stdio;

use async_trait::async_trait;
use params_fs::NormalizedPath;
use tokio::process::Command;

use crate::provider::VcsQuery;
use crate::{Error, Result};

/// Queries the repository by running the `git` executable.
///
/// A query succeeds only when the process exits zero **and** writes nothing
/// to stderr; the first line of stdout is the answer. There is no timeout
/// and no retry.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific executable instead of `git` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `git <args>` in `cwd` and return its trimmed stdout.
    pub async fn run(&self, cwd: &NormalizedPath, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.program, args.join(" "));
        tracing::debug!(%command, %cwd, "Running version-control query");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd.to_native())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(Error::CommandFailed {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }
        if !stderr.is_empty() {
            return Err(Error::UnexpectedStderr { command, stderr });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| Error::InvalidOutput {
                command: command.clone(),
            })?;
        match stdout.lines().next().map(str::trim) {
            Some(line) if !line.is_empty() => Ok(line.to_string()),
            _ => Err(Error::EmptyOutput { command }),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VcsQuery for GitCli {
    fn name(&self) -> &str {
        "git"
    }

    async fn top_level(&self, cwd: &NormalizedPath) -> Result<NormalizedPath> {
        self.run(cwd, &["rev-parse", "--show-toplevel"])
            .await
            .map(NormalizedPath::new)
    }

    async fn current_branch(&self, cwd: &NormalizedPath) -> Result<String> {
        let branch = self.run(cwd, &["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        if branch == "HEAD" {
            return Err(Error::DetachedHead);
        }
        Ok(branch)
    }
}
