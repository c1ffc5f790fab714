//! Subcommand implementations and the load step they share.
pub mod check;
pub mod dump;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::exec::SystemExecutor;
use crate::loader::{self, LoadOutcome, LoaderOptions};
use crate::logging::Logger;

/// Build loader options from the environment and the command line.
///
/// Flags win over `$JWMRC`, which wins over the built-in defaults.
#[must_use]
pub fn loader_options(global: &GlobalOpts) -> LoaderOptions {
    let mut options = LoaderOptions::from_env();
    if let Some(path) = &global.config {
        options.config_path.clone_from(path);
    }
    if let Some(path) = &global.fallback {
        options.fallback_path.clone_from(path);
    }
    if let Some(depth) = global.max_include_depth {
        options.max_include_depth = depth;
    }
    options
}

/// Load the configuration the way every command needs it.
///
/// The loader has already reported the cause of a fatal error as a
/// `configuration error:` diagnostic when this returns `Err`.
///
/// # Errors
///
/// Returns an error if the load hits a fatal condition.
pub fn load(global: &GlobalOpts, log: &Logger) -> Result<LoadOutcome> {
    let options = loader_options(global);
    log.debug(&format!("configuration: {}", options.config_path.display()));
    log.debug(&format!("fallback: {}", options.fallback_path.display()));
    loader::load(options, Box::new(SystemExecutor)).context("configuration could not be loaded")
}
