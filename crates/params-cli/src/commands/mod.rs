//! Command implementations for params-cli

pub mod apply;
pub mod chain;
pub mod params;
pub mod settings;

pub use apply::{ApplyTarget, run_apply};
pub use chain::run_chain;
pub use params::run_params;
pub use settings::run_settings;
