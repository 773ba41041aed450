//! Directory chain discovery
//!
//! A [`DirectoryChain`] is the ordered list of directories inspected for
//! property files: ancestor first, ending at the starting directory.

use crate::{Error, NormalizedPath, Result};

/// Ordered, ancestor-first list of directories from a boundary down to a
/// starting directory (both inclusive). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryChain {
    dirs: Vec<NormalizedPath>,
}

impl DirectoryChain {
    /// Build the chain from `boundary` down to `start`.
    ///
    /// Walks parents of `start` until `boundary` is reached. Fails with
    /// [`Error::OutsideBoundary`] if `start` does not lie under `boundary`.
    pub fn between(boundary: &NormalizedPath, start: &NormalizedPath) -> Result<Self> {
        let outside = || Error::OutsideBoundary {
            start: start.to_native(),
            boundary: boundary.to_native(),
        };
        if !boundary.contains(start) {
            return Err(outside());
        }

        let mut dirs = Vec::new();
        let mut current = start.clone();

        loop {
            dirs.push(current.clone());
            if &current == boundary {
                break;
            }
            current = current.parent().ok_or_else(outside)?;
        }

        dirs.reverse();
        tracing::debug!(%boundary, %start, len = dirs.len(), "Resolved directory chain");
        Ok(Self { dirs })
    }

    /// Build the chain from the filesystem root down to `start`.
    ///
    /// Used when no repository boundary is available.
    pub fn to_filesystem_root(start: &NormalizedPath) -> Self {
        let mut dirs = vec![start.clone()];
        let mut current = start.clone();
        while let Some(parent) = current.parent() {
            if parent == current {
                break;
            }
            dirs.push(parent.clone());
            current = parent;
        }

        dirs.reverse();
        tracing::debug!(%start, len = dirs.len(), "Resolved directory chain to filesystem root");
        Self { dirs }
    }

    /// Drop every directory above `boundary`.
    ///
    /// Fails with [`Error::OutsideBoundary`] if `boundary` is not part of
    /// this chain; the untrimmed chain is never returned in that case.
    pub fn trim_to(&self, boundary: &NormalizedPath) -> Result<Self> {
        let idx = self
            .dirs
            .iter()
            .position(|dir| dir == boundary)
            .ok_or_else(|| Error::OutsideBoundary {
                start: self.start().to_native(),
                boundary: boundary.to_native(),
            })?;

        Ok(Self {
            dirs: self.dirs[idx..].to_vec(),
        })
    }

    /// The outermost directory (the boundary).
    pub fn root(&self) -> &NormalizedPath {
        &self.dirs[0]
    }

    /// The innermost directory (where the walk started).
    pub fn start(&self) -> &NormalizedPath {
        &self.dirs[self.dirs.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Always `false`; a chain holds at least its starting directory.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedPath> {
        self.dirs.iter()
    }

    pub fn as_slice(&self) -> &[NormalizedPath] {
        &self.dirs
    }
}

impl<'a> IntoIterator for &'a DirectoryChain {
    type Item = &'a NormalizedPath;
    type IntoIter = std::slice::Iter<'a, NormalizedPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}

/// Find the nearest directory at or above `start` that contains a file
/// named `marker`.
pub fn find_marker_upward(start: &NormalizedPath, marker: &str) -> Option<NormalizedPath> {
    let mut current = Some(start.clone());
    while let Some(dir) = current {
        if dir.join(marker).is_file() {
            tracing::debug!(%dir, marker, "Found boundary marker");
            return Some(dir);
        }
        current = dir.parent();
    }
    None
}
