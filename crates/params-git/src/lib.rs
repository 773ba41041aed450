//! Version-control queries for infra-params
//!
//! The resolver needs two facts from version control: the repository's
//! top-level directory and the name of the checked-out branch. Both are
//! exposed through the [`VcsQuery`] trait with two backends:
//!
//! - [`GitCli`] runs `git rev-parse` as a subprocess
//! - [`LibGit`] reads the repository in-process through `git2`

pub mod command;
pub mod error;
pub mod libgit;
pub mod provider;

pub use command::GitCli;
pub use error::{Error, Result};
pub use libgit::LibGit;
pub use provider::VcsQuery;
