//! Error types for params-core

use std::path::PathBuf;

use params_fs::LayerKind;

/// Result type for params-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving and applying parameters.
///
/// Every variant aborts the whole operation; the message names the stage
/// that failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The root boundary of the directory chain could not be determined
    #[error("Could not resolve root boundary for {start}: {reason}")]
    Resolution { start: PathBuf, reason: String },

    /// The branch name could not be obtained from version control
    #[error("Could not resolve branch name: {source}")]
    BranchResolution {
        #[source]
        source: params_git::Error,
    },

    /// A property file of the given layer could not be read or parsed
    #[error("Failed to load {layer} property layer: {source}")]
    PropertyParse {
        layer: LayerKind,
        #[source]
        source: params_fs::Error,
    },

    /// Settings file exists but is not valid
    #[error("Invalid settings at {path}: {message}")]
    Settings { path: PathBuf, message: String },

    /// Settings file explicitly requested but missing
    #[error("Settings file not found at {path}")]
    SettingsNotFound { path: PathBuf },

    /// Descriptor extension is not one of json, yaml, yml
    #[error("Unsupported document format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Descriptor content could not be parsed
    #[error("Failed to parse {format} document: {message}")]
    DocumentParse { format: String, message: String },

    /// Descriptor could not be serialized back
    #[error("Failed to render {format} document: {message}")]
    DocumentRender { format: String, message: String },

    /// Filesystem error from params-fs
    #[error(transparent)]
    Fs(#[from] params_fs::Error),
}
