//! Settings command implementation

use params_core::Settings;

use crate::error::{CliError, Result};

/// Print the effective settings as TOML.
pub fn run_settings(settings: &Settings) -> Result<()> {
    let rendered = toml::to_string_pretty(settings).map_err(|e| CliError::user(e.to_string()))?;
    print!("{rendered}");
    Ok(())
}
