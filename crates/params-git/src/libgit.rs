//! In-process `git2` backend

use async_trait::async_trait;
use git2::{ErrorCode, Repository};
use params_fs::NormalizedPath;

use crate::provider::VcsQuery;
use crate::{Error, Result};

/// Queries the repository through libgit2, without spawning processes.
///
/// Discovery walks up from the working directory the same way `git` does.
/// Calls run on the blocking thread pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibGit;

impl LibGit {
    pub fn new() -> Self {
        Self
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Task {
            message: e.to_string(),
        })?
}

fn top_level_blocking(cwd: &NormalizedPath) -> Result<NormalizedPath> {
    let repo = Repository::discover(cwd.to_native())?;
    let workdir = repo.workdir().ok_or_else(|| Error::BareRepository {
        path: repo.path().to_path_buf(),
    })?;
    Ok(NormalizedPath::new(workdir))
}

fn current_branch_blocking(cwd: &NormalizedPath) -> Result<String> {
    let repo = Repository::discover(cwd.to_native())?;

    match repo.head() {
        Ok(head) if head.is_branch() => head
            .shorthand()
            .map(str::to_string)
            .ok_or(Error::DetachedHead),
        Ok(_) => Err(Error::DetachedHead),
        // No commits yet: HEAD still names the branch symbolically
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD")?;
            head.symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(str::to_string)
                .ok_or(Error::DetachedHead)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl VcsQuery for LibGit {
    fn name(&self) -> &str {
        "libgit2"
    }

    async fn top_level(&self, cwd: &NormalizedPath) -> Result<NormalizedPath> {
        let cwd = cwd.clone();
        blocking(move || top_level_blocking(&cwd)).await
    }

    async fn current_branch(&self, cwd: &NormalizedPath) -> Result<String> {
        let cwd = cwd.clone();
        blocking(move || current_branch_blocking(&cwd)).await
    }
}
