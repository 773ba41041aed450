//! Filesystem layer for infra-params
//!
//! Provides normalized paths, directory chain discovery, `.properties`
//! parsing and layered loading of property files along a chain.

pub mod chain;
pub mod error;
pub mod io;
pub mod layer;
pub mod path;
pub mod properties;

pub use chain::{DirectoryChain, find_marker_upward};
pub use error::{Error, Result};
pub use layer::{LayerKind, LoadedLayer, load_at, load_layer};
pub use path::NormalizedPath;
pub use properties::{Properties, parse_properties, read_properties};
