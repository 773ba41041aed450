//! Parameter resolution and placeholder substitution for infra-params
//!
//! Resolves branch- and directory-specific parameters from layered
//! `.properties` files and substitutes them into deployment descriptors.
//!
//! # Architecture
//!
//! ```text
//!              infra-params CLI
//!                     |
//!                params-core
//!                 /        \
//!           params-fs    params-git
//! ```
//!
//! # Layer precedence
//!
//! Lowest to highest; within a layer kind, deeper directories win:
//!
//! 1. **Common**: `infra.properties` in every directory of the chain
//! 2. **Branch**: `infra-<branch>.properties` in every directory of the chain
//! 3. **Root override**: `infra-root.properties` at the override boundary only
//!
//! # Example
//!
//! ```ignore
//! use params_core::{DocumentFormat, Orchestrator, Settings};
//! use params_fs::NormalizedPath;
//! use params_git::GitCli;
//!
//! let orchestrator = Orchestrator::new(Settings::default(), Box::new(GitCli::new()));
//! let start = NormalizedPath::canonicalize(".")?;
//! let document = DocumentFormat::Yaml.parse(&descriptor)?;
//! let applied = orchestrator.resolve_and_apply(&start, None, &document).await?;
//! println!("{}", DocumentFormat::Yaml.render(&applied.document)?);
//! ```

pub mod branch;
pub mod document;
pub mod error;
pub mod orchestrator;
pub mod settings;
pub mod substitute;

pub use branch::{Branch, BranchResolver, BranchSource, override_from_env};
pub use document::{DocumentFormat, Node, Scalar};
pub use error::{Error, Result};
pub use orchestrator::{Applied, ChainMode, Orchestrator, Resolution, merge_layers};
pub use params_fs::Properties;
pub use settings::{Settings, SettingsResolver};
pub use substitute::{Substituter, substitute_document};
