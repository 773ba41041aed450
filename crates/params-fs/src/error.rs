//! Error types for params-fs

use std::path::PathBuf;

/// Result type for params-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in params-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse properties file {path}: {message}")]
    PropertyParse { path: PathBuf, message: String },

    #[error("{start} is not inside boundary {boundary}")]
    OutsideBoundary { start: PathBuf, boundary: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
