//! Provenance-annotated warnings about malformed configuration.
//!
//! A [`Diagnostic`] never stops the load. Builders report one through
//! [`Diagnostics`], which forwards it to `tracing` and keeps a copy so callers
//! (and tests) can inspect everything that was wrong with a document.
use std::fmt;

use serde::Serialize;

use crate::error::{LoadError, TokenizeError};
use crate::tree::TagNode;

/// `tracing` target used for every configuration warning.
pub const DIAGNOSTIC_TARGET: &str = "jwmrc::config";

/// Source location of a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    /// File name (or generator command) the tag was read from.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
}

/// A single configuration warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the problem was found, when known.
    pub origin: Option<Origin>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// A warning about a specific tag.
    #[must_use]
    pub fn at(node: &TagNode, message: impl Into<String>) -> Self {
        Self {
            origin: Some(node.origin()),
            message: message.into(),
        }
    }

    /// A warning with an optional, previously recorded origin.
    #[must_use]
    pub fn with_origin(origin: Option<&Origin>, message: impl Into<String>) -> Self {
        Self {
            origin: origin.cloned(),
            message: message.into(),
        }
    }

    /// A warning with no source location.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            origin: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "{}[{}]: {}", origin.file, origin.line, self.message),
            None => write!(f, "configuration error: {}", self.message),
        }
    }
}

impl From<TokenizeError> for Diagnostic {
    fn from(err: TokenizeError) -> Self {
        Self {
            origin: Some(Origin {
                file: err.file,
                line: err.line,
            }),
            message: err.message,
        }
    }
}

impl From<&LoadError> for Diagnostic {
    fn from(err: &LoadError) -> Self {
        Self::general(err.to_string())
    }
}

/// Collects every warning raised during one load.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit and record a warning.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(target: DIAGNOSTIC_TARGET, "{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Emit and record a warning about `node`.
    pub fn at(&mut self, node: &TagNode, message: impl Into<String>) {
        self.report(Diagnostic::at(node, message));
    }

    /// All warnings so far, in the order they were raised.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of warnings raised.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the collection.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::tree::TagKind;

    #[test]
    fn located_diagnostic_uses_file_and_line() {
        let node = TagNode::new(TagKind::Key, Rc::from("/home/u/.jwmrc"), 42);
        let d = Diagnostic::at(&node, "invalid Key action: \"bogus\"");
        assert_eq!(d.to_string(), "/home/u/.jwmrc[42]: invalid Key action: \"bogus\"");
    }

    #[test]
    fn general_diagnostic_uses_generic_prefix() {
        let d = Diagnostic::general("could not open a or b");
        assert_eq!(d.to_string(), "configuration error: could not open a or b");
    }

    #[test]
    fn fatal_errors_have_no_location() {
        let d = Diagnostic::from(&LoadError::IncludeDepthExceeded { max: 8 });
        assert_eq!(d.to_string(), "configuration error: include depth (8) exceeded");
    }

    #[test]
    fn tokenize_error_keeps_its_location() {
        let err = TokenizeError {
            file: "menu.xml".to_string(),
            line: 7,
            message: "unclosed tag <Menu>".to_string(),
        };
        let d = Diagnostic::from(err);
        assert_eq!(d.to_string(), "menu.xml[7]: unclosed tag <Menu>");
    }

    #[test]
    fn collection_preserves_order() {
        let mut diags = Diagnostics::new();
        diags.report(Diagnostic::general("first"));
        diags.report(Diagnostic::general("second"));
        assert_eq!(diags.len(), 2);
        assert_eq!(diags.entries()[0].message, "first");
        assert_eq!(diags.into_vec()[1].message, "second");
    }
}
