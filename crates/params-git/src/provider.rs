//! Version-control query trait

use async_trait::async_trait;
use params_fs::NormalizedPath;

use crate::Result;

/// Queries answered by a version-control backend.
///
/// Every query runs relative to an explicit working directory rather than
/// the process's current directory.
#[async_trait]
pub trait VcsQuery: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Top-level directory of the repository containing `cwd`
    async fn top_level(&self, cwd: &NormalizedPath) -> Result<NormalizedPath>;

    /// Name of the branch checked out at `cwd`
    async fn current_branch(&self, cwd: &NormalizedPath) -> Result<String>;
}
