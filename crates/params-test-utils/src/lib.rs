//! Shared test utilities for the infra-params workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`git`]: git repository fixtures at two realism levels
//! - [`tree`]: [`TestTree`] builder for nested property-file layouts

pub mod git;
pub mod tree;

pub use tree::TestTree;
