//! Top-level entry point: open the root configuration, walk it, finalize.
use std::path::{Path, PathBuf};

use crate::config::WmConfig;
use crate::context::BuildContext;
use crate::diagnostics::Diagnostic;
use crate::dispatch;
use crate::error::LoadError;
use crate::exec::Executor;
use crate::include::{self, MAX_INCLUDE_DEPTH};
use crate::lexer;
use crate::validate;

/// Per-user configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "~/.jwmrc";

/// System-wide configuration used when the per-user file cannot be opened.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/system.jwmrc";

/// Shell that runs `exec:` menu generators.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Environment variable that may name the per-user configuration file.
pub const CONFIG_ENV_VAR: &str = "JWMRC";

/// Settings for one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// File tried first.
    pub config_path: PathBuf,
    /// File tried when `config_path` cannot be opened.
    pub fallback_path: PathBuf,
    /// Deepest chain of nested includes accepted.
    pub max_include_depth: u32,
    /// Shell used for `exec:` includes.
    pub shell: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref()),
            fallback_path: PathBuf::from(SYSTEM_CONFIG_PATH),
            max_include_depth: MAX_INCLUDE_DEPTH,
            shell: DEFAULT_SHELL.to_string(),
        }
    }
}

impl LoaderOptions {
    /// Defaults, with `config_path` taken from `$JWMRC` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            options.config_path = PathBuf::from(path);
        }
        options
    }
}

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The finished configuration.
    pub config: WmConfig,
    /// Every warning raised, in order.
    pub diagnostics: Vec<Diagnostic>,
    /// The root file that was actually used.
    pub source: PathBuf,
}

/// Load the configuration described by `options`.
///
/// Tries `config_path`, then `fallback_path`. Warnings never stop the load;
/// they are collected in the outcome. A fatal error is reported as a
/// general diagnostic before it is returned.
///
/// # Errors
///
/// Returns [`LoadError::NoRootConfig`] if neither file can be opened, or
/// [`LoadError::IncludeDepthExceeded`] if includes nest too deeply.
pub fn load(options: LoaderOptions, executor: Box<dyn Executor>) -> Result<LoadOutcome, LoadError> {
    let primary = options.config_path.clone();
    let fallback = options.fallback_path.clone();
    let mut ctx = BuildContext::new(options, executor);

    match parse_root(&mut ctx, primary, fallback) {
        Ok(source) => Ok(finish(ctx, source)),
        Err(err) => Err(fatal(&mut ctx, err)),
    }
}

/// Load a configuration document held in memory, labelled `name`.
///
/// Includes inside the document are resolved as usual.
///
/// # Errors
///
/// Returns [`LoadError::IncludeDepthExceeded`] if includes nest too deeply.
pub fn load_str(
    text: &str,
    name: &str,
    options: LoaderOptions,
    executor: Box<dyn Executor>,
) -> Result<LoadOutcome, LoadError> {
    let mut ctx = BuildContext::new(options, executor);
    match parse_text(&mut ctx, text, name) {
        Ok(()) => Ok(finish(ctx, PathBuf::from(name))),
        Err(err) => Err(fatal(&mut ctx, err)),
    }
}

/// Parse the primary file, or the fallback if the primary cannot be opened.
/// Returns the path that was used.
fn parse_root(
    ctx: &mut BuildContext,
    primary: PathBuf,
    fallback: PathBuf,
) -> Result<PathBuf, LoadError> {
    if parse_file(ctx, &primary)? {
        return Ok(primary);
    }
    tracing::info!(
        "could not open {}, using {}",
        primary.display(),
        fallback.display()
    );
    if parse_file(ctx, &fallback)? {
        Ok(fallback)
    } else {
        Err(LoadError::NoRootConfig { primary, fallback })
    }
}

fn fatal(ctx: &mut BuildContext, err: LoadError) -> LoadError {
    ctx.diagnostics.report(Diagnostic::from(&err));
    err
}

/// Parse one root file. Returns `false` if it could not be opened.
fn parse_file(ctx: &mut BuildContext, path: &Path) -> Result<bool, LoadError> {
    let text = match include::read_file(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("{e}");
            return Ok(false);
        }
    };
    tracing::debug!("loading {}", path.display());
    parse_text(ctx, &text, &path.display().to_string())?;
    Ok(true)
}

fn parse_text(ctx: &mut BuildContext, text: &str, name: &str) -> Result<(), LoadError> {
    match lexer::tokenize(text, name) {
        Ok(roots) => dispatch::parse_document(ctx, &roots, 0),
        Err(e) => {
            ctx.diagnostics.report(e.into());
            Ok(())
        }
    }
}

fn finish(mut ctx: BuildContext, source: PathBuf) -> LoadOutcome {
    validate::validate_tray_buttons(&mut ctx);
    validate::validate_keys(&mut ctx);
    let (config, diagnostics) = ctx.finish();
    tracing::debug!(
        "loaded {} with {} warning(s)",
        source.display(),
        diagnostics.len()
    );
    LoadOutcome {
        config,
        diagnostics: diagnostics.into_vec(),
        source,
    }
}
