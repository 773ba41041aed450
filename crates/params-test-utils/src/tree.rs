//! [`TestTree`] builder for nested property-file layouts.

use std::fs;
use std::path::{Path, PathBuf};

use params_fs::NormalizedPath;
use tempfile::TempDir;

/// A temporary directory tree with helpers for writing property files.
///
/// # Example
///
/// ```rust,no_run
/// use params_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.properties("", "infra.properties", &[("env", "prod")]);
/// tree.properties("svc/api", "infra-main.properties", &[("env", "main")]);
/// let start = tree.dir("svc/api");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Raw path of the temporary root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canonical root, comparable with paths reported by git.
    pub fn root(&self) -> NormalizedPath {
        NormalizedPath::canonicalize(self.path()).unwrap()
    }

    /// Canonical path of `rel`, creating the directory if needed.
    pub fn dir(&self, rel: &str) -> NormalizedPath {
        let path = self.native(rel);
        fs::create_dir_all(&path).unwrap();
        NormalizedPath::canonicalize(&path).unwrap()
    }

    /// Write `file` in directory `rel` with one `key=value` line per pair.
    pub fn properties(&self, rel: &str, file: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let content: String = pairs.iter().map(|(k, v)| format!("{k}={v}\n")).collect();
        self.write(rel, file, &content)
    }

    /// Write raw `content` to `file` in directory `rel`.
    pub fn write(&self, rel: &str, file: &str, content: &str) -> PathBuf {
        let dir = self.native(rel);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    fn native(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.path().to_path_buf()
        } else {
            self.path().join(rel)
        }
    }
}
