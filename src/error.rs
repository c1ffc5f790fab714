//! Error types for the configuration loader.
//!
//! Only [`LoadError`] ever escapes a load. Everything else is converted into
//! a [`Diagnostic`](crate::diagnostics::Diagnostic) where it happens and the
//! walk carries on.
//!
//! # Error hierarchy
//!
//! ```text
//! LoadError                 fatal, aborts the whole load
//! ├── IncludeDepthExceeded
//! └── NoRootConfig
//!
//! IncludeError              recoverable, the include contributes nothing
//! ├── PathExpansion
//! ├── Read
//! ├── Spawn
//! └── Tokenize(TokenizeError)
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Conditions that abort the entire load.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Nested includes went deeper than the configured maximum.
    #[error("include depth ({max}) exceeded")]
    IncludeDepthExceeded {
        /// The configured maximum depth.
        max: u32,
    },

    /// Neither the primary nor the fallback configuration could be opened.
    #[error("could not open {} or {}", primary.display(), fallback.display())]
    NoRootConfig {
        /// The configuration file that was tried first.
        primary: PathBuf,
        /// The system-wide fallback file.
        fallback: PathBuf,
    },
}

/// Failures while turning an include reference into a tag tree.
#[derive(Error, Debug)]
pub enum IncludeError {
    /// Home-directory or variable expansion failed.
    #[error("could not expand include path {reference}: {message}")]
    PathExpansion {
        /// The reference as written.
        reference: String,
        /// What went wrong.
        message: String,
    },

    /// The file could not be read.
    #[error("could not open include: {}", path.display())]
    Read {
        /// Expanded path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The generator command could not be started.
    #[error("could not execute included program: {command}")]
    Spawn {
        /// The command line handed to the shell.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The content was read but is not well-formed markup.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
}

/// Markup that the lexer could not turn into a tag tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}[{line}]: {message}")]
pub struct TokenizeError {
    /// File (or command) being tokenized.
    pub file: String,
    /// Line the problem was detected on.
    pub line: u32,
    /// Description from the lexer.
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn depth_exceeded_display() {
        let e = LoadError::IncludeDepthExceeded { max: 8 };
        assert_eq!(e.to_string(), "include depth (8) exceeded");
    }

    #[test]
    fn no_root_config_names_both_paths() {
        let e = LoadError::NoRootConfig {
            primary: PathBuf::from("/home/u/.jwmrc"),
            fallback: PathBuf::from("/etc/system.jwmrc"),
        };
        assert_eq!(
            e.to_string(),
            "could not open /home/u/.jwmrc or /etc/system.jwmrc"
        );
    }

    #[test]
    fn read_error_has_source() {
        use std::error::Error as StdError;
        let e = IncludeError::Read {
            path: PathBuf::from("/nope.xml"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(e.to_string(), "could not open include: /nope.xml");
        assert!(e.source().is_some());
    }

    #[test]
    fn spawn_error_display() {
        let e = IncludeError::Spawn {
            command: "menugen --xdg".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no shell"),
        };
        assert_eq!(
            e.to_string(),
            "could not execute included program: menugen --xdg"
        );
    }

    #[test]
    fn tokenize_error_is_transparent() {
        let e: IncludeError = TokenizeError {
            file: "a.xml".to_string(),
            line: 3,
            message: "unexpected end of file".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "a.xml[3]: unexpected end of file");
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_types_are_send_sync() {
        assert_send_sync::<LoadError>();
        assert_send_sync::<IncludeError>();
        assert_send_sync::<TokenizeError>();
    }

    #[test]
    fn load_error_converts_to_anyhow() {
        let e = LoadError::IncludeDepthExceeded { max: 1 };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
