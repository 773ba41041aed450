//! Resolve-and-apply orchestration
//!
//! Ties the pieces together for one invocation:
//!
//! ```text
//!   branch resolver ─┐
//!                    ├─ join ─> common layer ─┐
//!   chain resolver ──┘          branch layer ─┼─ merge ─> substitution
//!                               root override ┘
//! ```
//!
//! Nothing is cached between invocations and nothing is applied unless
//! every stage succeeds.

use params_fs::{
    DirectoryChain, LayerKind, LoadedLayer, NormalizedPath, find_marker_upward, load_at,
    load_layer,
};
use params_git::VcsQuery;

use crate::branch::{Branch, BranchResolver};
use crate::document::Node;
use crate::settings::Settings;
use crate::substitute::Substituter;
use crate::{Error, Properties, Result};

/// How far up the directory chain reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainMode {
    /// Stop at the repository top level (or the override boundary)
    #[default]
    Repository,
    /// Walk all the way to the filesystem root
    FilesystemRoot,
}

/// Everything learned while resolving parameters.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub branch: Branch,
    /// Directories that were searched, ancestor first
    pub chain: DirectoryChain,
    /// Directory holding the root-override file, in override mode
    pub override_boundary: Option<NormalizedPath>,
    /// Common, branch and root-override layers, in that order
    pub layers: Vec<LoadedLayer>,
    /// Merged parameters
    pub parameters: Properties,
}

impl Resolution {
    /// Every property file that contributed, in precedence order.
    pub fn sources(&self) -> impl Iterator<Item = (LayerKind, &NormalizedPath)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.sources.iter().map(move |s| (layer.kind, s)))
    }
}

/// Result of [`Orchestrator::resolve_and_apply`].
#[derive(Debug, Clone)]
pub struct Applied {
    /// The substituted document
    pub document: Node,
    pub resolution: Resolution,
}

/// Merge layers in increasing precedence; later layers overwrite earlier.
pub fn merge_layers<'a>(layers: impl IntoIterator<Item = &'a LoadedLayer>) -> Properties {
    let mut merged = Properties::new();
    for layer in layers {
        merged.extend(layer.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

fn canonical_or_self(path: NormalizedPath) -> NormalizedPath {
    NormalizedPath::canonicalize(path.to_native()).unwrap_or(path)
}

fn resolution_error(start: &NormalizedPath, reason: impl ToString) -> Error {
    Error::Resolution {
        start: start.to_native(),
        reason: reason.to_string(),
    }
}

fn layer_error(layer: LayerKind) -> impl FnOnce(params_fs::Error) -> Error {
    move |source| Error::PropertyParse { layer, source }
}

/// Resolves parameters for a working directory and applies them to
/// documents.
///
/// The working directory, branch override and document are explicit
/// inputs; the orchestrator reads no ambient process state.
pub struct Orchestrator {
    settings: Settings,
    vcs: Box<dyn VcsQuery>,
    chain_mode: ChainMode,
}

impl Orchestrator {
    pub fn new(settings: Settings, vcs: Box<dyn VcsQuery>) -> Self {
        Self {
            settings,
            vcs,
            chain_mode: ChainMode::default(),
        }
    }

    pub fn with_chain_mode(mut self, chain_mode: ChainMode) -> Self {
        self.chain_mode = chain_mode;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Compute the directory chain for `start` and, in override mode, the
    /// override boundary.
    ///
    /// In override mode the chain is cut so it begins at the boundary. A
    /// boundary that is not on the repository chain is an error. When the
    /// repository top level is unknown, the boundary alone bounds the chain.
    pub async fn resolve_chain(
        &self,
        start: &NormalizedPath,
    ) -> Result<(DirectoryChain, Option<NormalizedPath>)> {
        let boundary = if self.settings.root_override {
            find_marker_upward(start, &self.settings.root_override_file)
        } else {
            None
        };

        let chain = match self.chain_mode {
            ChainMode::FilesystemRoot => DirectoryChain::to_filesystem_root(start),
            ChainMode::Repository => match self.vcs.top_level(start).await {
                Ok(top) => {
                    let top = canonical_or_self(top);
                    DirectoryChain::between(&top, start)
                        .map_err(|e| resolution_error(start, e))?
                }
                Err(e) => match &boundary {
                    Some(dir) => {
                        tracing::warn!(
                            error = %e,
                            boundary = %dir,
                            "Repository root unavailable; using override boundary"
                        );
                        let chain = DirectoryChain::between(dir, start)
                            .map_err(|e| resolution_error(start, e))?;
                        return Ok((chain, Some(dir.clone())));
                    }
                    None => return Err(resolution_error(start, e)),
                },
            },
        };

        let chain = match &boundary {
            Some(dir) => chain
                .trim_to(dir)
                .map_err(|e| resolution_error(start, e))?,
            None => chain,
        };
        Ok((chain, boundary))
    }

    /// Resolve the branch and the merged parameter set for `start`.
    pub async fn resolve(
        &self,
        start: &NormalizedPath,
        branch_override: Option<String>,
    ) -> Result<Resolution> {
        let branches = BranchResolver::new(self.vcs.as_ref(), branch_override);
        let (branch, (chain, override_boundary)) =
            tokio::try_join!(branches.resolve(start), self.resolve_chain(start))?;

        let common = load_layer(&chain, LayerKind::Common, |_| {
            self.settings.common_file.clone()
        })
        .map_err(layer_error(LayerKind::Common))?;

        let branch_file = self.settings.branch_file_name(&branch.name);
        let branch_layer = load_layer(&chain, LayerKind::Branch, |_| branch_file.clone())
            .map_err(layer_error(LayerKind::Branch))?;

        let root_override = match &override_boundary {
            Some(dir) => load_at(dir, LayerKind::RootOverride, &self.settings.root_override_file)
                .map_err(layer_error(LayerKind::RootOverride))?,
            None => LoadedLayer::empty(LayerKind::RootOverride),
        };

        let layers = vec![common, branch_layer, root_override];
        let parameters = merge_layers(&layers);
        tracing::info!(
            branch = %branch.name,
            source = %branch.source,
            directories = chain.len(),
            ?parameters,
            "Resolved parameters"
        );

        Ok(Resolution {
            branch,
            chain,
            override_boundary,
            layers,
            parameters,
        })
    }

    /// Resolve parameters for `start` and substitute them into `document`.
    ///
    /// The input document is left untouched; the returned
    /// [`Applied::document`] is the result.
    pub async fn resolve_and_apply(
        &self,
        start: &NormalizedPath,
        branch_override: Option<String>,
        document: &Node,
    ) -> Result<Applied> {
        let resolution = self.resolve(start, branch_override).await?;
        let substituter = Substituter::new(&resolution.parameters);
        let document = substituter.apply(document, self.settings.reserved_field());

        Ok(Applied {
            document,
            resolution,
        })
    }
}
