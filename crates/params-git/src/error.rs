//! Error types for params-git

use std::path::PathBuf;

/// Result type for params-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying version control
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("`{command}` wrote to stderr: {stderr}")]
    UnexpectedStderr { command: String, stderr: String },

    #[error("`{command}` produced no output")]
    EmptyOutput { command: String },

    #[error("`{command}` produced output that is not valid UTF-8")]
    InvalidOutput { command: String },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository at {path} has no working directory")]
    BareRepository { path: PathBuf },

    #[error("HEAD is detached; no branch name is available")]
    DetachedHead,

    #[error("Background git task failed: {message}")]
    Task { message: String },
}
