//! Layered loading of property files along a directory chain

use std::fmt;

use crate::properties::read_properties;
use crate::{DirectoryChain, NormalizedPath, Properties, Result};

/// Category of property file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Shared by every branch
    Common,
    /// Named after the active branch
    Branch,
    /// Read only at the override boundary; beats everything else
    RootOverride,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Branch => "branch",
            Self::RootOverride => "root-override",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged result of one layer kind, with the files that contributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedLayer {
    pub kind: LayerKind,
    pub properties: Properties,
    /// Files that were read, in merge order
    pub sources: Vec<NormalizedPath>,
}

impl LoadedLayer {
    pub fn empty(kind: LayerKind) -> Self {
        Self {
            kind,
            properties: Properties::new(),
            sources: Vec::new(),
        }
    }

    fn absorb(&mut self, file: NormalizedPath) -> Result<()> {
        let props = read_properties(&file)?;
        tracing::debug!(layer = %self.kind, %file, keys = props.len(), "Loaded property file");
        self.properties.extend(props);
        self.sources.push(file);
        Ok(())
    }
}

/// Load every existing file produced by `file_name` across `chain`.
///
/// Directories are visited ancestor-first, so keys defined deeper in the
/// chain overwrite those defined above them. Missing files are skipped.
pub fn load_layer<F>(chain: &DirectoryChain, kind: LayerKind, file_name: F) -> Result<LoadedLayer>
where
    F: Fn(&NormalizedPath) -> String,
{
    let mut layer = LoadedLayer::empty(kind);
    for dir in chain {
        let file = dir.join(&file_name(dir));
        if file.is_file() {
            layer.absorb(file)?;
        } else {
            tracing::trace!(layer = %kind, %file, "No property file");
        }
    }
    Ok(layer)
}

/// Load a single file named `file_name` in `dir`, if it exists.
pub fn load_at(dir: &NormalizedPath, kind: LayerKind, file_name: &str) -> Result<LoadedLayer> {
    let mut layer = LoadedLayer::empty(kind);
    let file = dir.join(file_name);
    if file.is_file() {
        layer.absorb(file)?;
    }
    Ok(layer)
}
