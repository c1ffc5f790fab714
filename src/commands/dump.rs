//! Command: print the loaded configuration as JSON.
use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::WmConfig;
use crate::logging::Logger;

/// Render `config` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(config: &WmConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("failed to serialize configuration")
}

/// Run the dump command.
///
/// # Errors
///
/// Returns an error if the load fails fatally or serialization fails.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let outcome = super::load(global, log)?;
    log.debug(&format!("loaded {}", outcome.source.display()));
    println!("{}", render(&outcome.config)?);
    Ok(())
}
