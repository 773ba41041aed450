//! Resolver settings with hierarchical merge
//!
//! Settings decide which files are read and how the document is treated.
//! They are loaded from up to two TOML files on top of built-in defaults:
//!
//! 1. Built-in defaults
//! 2. Global settings (`<config_dir>/infra-params/config.toml`)
//! 3. An explicit settings file (e.g. `--config` on the command line)
//!
//! Later sources override earlier ones key by key.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Token replaced by the branch name in [`Settings::branch_file_pattern`].
pub const BRANCH_TOKEN: &str = "{branch}";

/// Effective settings for one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Property file read in every directory of the chain
    pub common_file: String,

    /// Branch-specific file name; `{branch}` is replaced by the branch
    pub branch_file_pattern: String,

    /// Root-override file; its presence also marks the override boundary
    pub root_override_file: String,

    /// Enables root-override mode
    pub root_override: bool,

    /// Environment variable that overrides the branch name
    pub branch_env_var: String,

    /// Top-level document field that is never substituted; empty disables
    pub reserved_field: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            common_file: "infra.properties".to_string(),
            branch_file_pattern: "infra-{branch}.properties".to_string(),
            root_override_file: "infra-root.properties".to_string(),
            root_override: false,
            branch_env_var: "INFRA_PARAMS_BRANCH".to_string(),
            reserved_field: "serverless".to_string(),
        }
    }
}

impl Settings {
    /// File name of the branch layer for `branch`.
    pub fn branch_file_name(&self, branch: &str) -> String {
        self.branch_file_pattern.replace(BRANCH_TOKEN, branch)
    }

    /// The reserved field, or `None` when disabled.
    pub fn reserved_field(&self) -> Option<&str> {
        Some(self.reserved_field.as_str()).filter(|f| !f.is_empty())
    }

    fn merge(&mut self, overlay: SettingsFile) {
        if let Some(v) = overlay.common_file {
            self.common_file = v;
        }
        if let Some(v) = overlay.branch_file_pattern {
            self.branch_file_pattern = v;
        }
        if let Some(v) = overlay.root_override_file {
            self.root_override_file = v;
        }
        if let Some(v) = overlay.root_override {
            self.root_override = v;
        }
        if let Some(v) = overlay.branch_env_var {
            self.branch_env_var = v;
        }
        if let Some(v) = overlay.reserved_field {
            self.reserved_field = v;
        }
    }
}

/// One settings file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    common_file: Option<String>,
    branch_file_pattern: Option<String>,
    root_override_file: Option<String>,
    root_override: Option<bool>,
    branch_env_var: Option<String>,
    reserved_field: Option<String>,
}

impl SettingsFile {
    fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Resolves [`Settings`] by merging the settings hierarchy.
#[derive(Debug, Default)]
pub struct SettingsResolver {
    /// Override for the global config directory (used for testing).
    /// When `None`, the platform-appropriate directory is used via `dirs::config_dir()`.
    global_config_dir_override: Option<PathBuf>,

    /// Explicit settings file; must exist when set
    explicit: Option<PathBuf>,
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom global config directory instead of the platform one.
    pub fn with_global_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_config_dir_override = Some(dir.into());
        self
    }

    /// Merge `path` on top of the global settings.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join("infra-params"))
    }

    /// Merge defaults, the global file and the explicit file.
    ///
    /// A missing global file is skipped; a missing explicit file is an
    /// error. Invalid TOML in either is an error.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(global_dir) = self.global_config_dir() {
            let global_path = global_dir.join("config.toml");
            if global_path.is_file() {
                tracing::debug!(?global_path, "Loading global settings");
                settings.merge(SettingsFile::load(&global_path)?);
            } else {
                tracing::debug!(?global_path, "No global settings found, skipping");
            }
        }

        if let Some(path) = &self.explicit {
            if !path.is_file() {
                return Err(Error::SettingsNotFound { path: path.clone() });
            }
            tracing::debug!(?path, "Loading settings file");
            settings.merge(SettingsFile::load(path)?);
        }

        Ok(settings)
    }
}
