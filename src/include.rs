//! Include resolution: turning a reference into a fresh tag tree.
//!
//! Two kinds of reference exist. A file reference is shell-expanded, read in
//! full and tokenized. A command reference (only allowed inside menus, and
//! written `exec:<command>`) is run through the configured shell and its
//! standard output is tokenized as if it were a file. The command's exit
//! status is ignored; only the output matters.
//!
//! Every include consumes one level of the depth budget through [`enter`],
//! which is the only place the ceiling is enforced.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IncludeError, LoadError};
use crate::exec::Executor;
use crate::lexer;
use crate::tree::TagNode;

/// Default ceiling on nested includes.
pub const MAX_INCLUDE_DEPTH: u32 = 8;

/// Prefix marking a menu include as a generator command.
pub const EXEC_PREFIX: &str = "exec:";

/// Where an include's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeSource {
    /// A file on disk, already expanded.
    File(PathBuf),
    /// A shell command whose standard output is the content.
    Command(String),
}

impl IncludeSource {
    /// Classify a top-level include reference. Always a file.
    ///
    /// # Errors
    ///
    /// Returns [`IncludeError::PathExpansion`] if a referenced variable is
    /// undefined.
    pub fn file(reference: &str) -> Result<Self, IncludeError> {
        expand_path(reference).map(Self::File)
    }

    /// Classify a menu include reference: `exec:` commands or files.
    ///
    /// # Errors
    ///
    /// Returns [`IncludeError::PathExpansion`] if a referenced variable is
    /// undefined.
    pub fn menu(reference: &str) -> Result<Self, IncludeError> {
        match reference.strip_prefix(EXEC_PREFIX) {
            Some(command) => Ok(Self::Command(command.to_string())),
            None => Self::file(reference),
        }
    }

    /// Name recorded as the source file of every node in the resulting tree.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Command(command) => command.clone(),
        }
    }
}

/// Expand `~` and `$VAR` / `${VAR}` references in a path.
///
/// # Errors
///
/// Returns [`IncludeError::PathExpansion`] if a variable is undefined.
pub fn expand_path(reference: &str) -> Result<PathBuf, IncludeError> {
    shellexpand::full(reference)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| IncludeError::PathExpansion {
            reference: reference.to_string(),
            message: e.to_string(),
        })
}

/// Consume one level of include depth.
///
/// Returns the depth the included document is processed at. The root
/// document is processed at depth 0, so a chain of `max` nested includes is
/// accepted and one more is not.
///
/// # Errors
///
/// Returns [`LoadError::IncludeDepthExceeded`] when the next depth would
/// exceed `max`. This aborts the whole load.
pub const fn enter(depth: u32, max: u32) -> Result<u32, LoadError> {
    let next = depth.saturating_add(1);
    if next > max {
        Err(LoadError::IncludeDepthExceeded { max })
    } else {
        Ok(next)
    }
}

/// Read a whole file into memory.
///
/// # Errors
///
/// Returns [`IncludeError::Read`] if the file cannot be opened or read.
pub fn read_file(path: &Path) -> Result<String, IncludeError> {
    let bytes = fs::read(path).map_err(|source| IncludeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Produce the tag tree for `source`.
///
/// # Errors
///
/// Returns an [`IncludeError`] if the file cannot be read, the command cannot
/// be spawned, or the content is not well-formed markup.
pub fn resolve(
    source: &IncludeSource,
    executor: &dyn Executor,
    shell: &str,
) -> Result<Vec<TagNode>, IncludeError> {
    let label = source.label();
    let text = match source {
        IncludeSource::File(path) => {
            tracing::debug!("reading include {}", path.display());
            read_file(path)?
        }
        IncludeSource::Command(command) => {
            tracing::debug!("running menu generator {command}");
            let result = executor
                .run_shell(shell, command)
                .map_err(|source| IncludeError::Spawn {
                    command: command.clone(),
                    source,
                })?;
            if !result.success {
                tracing::debug!(
                    "menu generator {command} exited with {:?}; using its output anyway",
                    result.code
                );
            }
            result.stdout
        }
    };
    Ok(lexer::tokenize(&text, &label)?)
}
