//! Shared state threaded through every builder during one load.
use crate::config::WmConfig;
use crate::diagnostics::Diagnostics;
use crate::exec::Executor;
use crate::loader::LoaderOptions;
use crate::tree::TagNode;

/// Owns everything a load mutates.
///
/// Created by the loader, passed by `&mut` into every builder, and split
/// back into its results once the walk and the finalization passes are done.
/// Tests construct one directly to exercise a single builder in isolation.
#[derive(Debug)]
pub struct BuildContext {
    /// Configuration being built.
    pub config: WmConfig,
    /// Every warning raised so far.
    pub diagnostics: Diagnostics,
    /// Loader settings (shell, include depth ceiling, ...).
    pub options: LoaderOptions,
    executor: Box<dyn Executor>,
}

impl BuildContext {
    /// Start a fresh load with default configuration values.
    #[must_use]
    pub fn new(options: LoaderOptions, executor: Box<dyn Executor>) -> Self {
        Self {
            config: WmConfig::new(),
            diagnostics: Diagnostics::new(),
            options,
            executor,
        }
    }

    /// Report a problem with `node` and carry on.
    pub fn warn(&mut self, node: &TagNode, message: impl Into<String>) {
        self.diagnostics.at(node, message);
    }

    /// Executor used for command-sourced includes.
    #[must_use]
    pub fn executor(&self) -> &dyn Executor {
        self.executor.as_ref()
    }

    /// Give up the context, keeping the results.
    #[must_use]
    pub fn finish(self) -> (WmConfig, Diagnostics) {
        (self.config, self.diagnostics)
    }
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::test_helpers::{context, node};
    use crate::tree::TagKind;

    #[test]
    fn warn_records_node_origin() {
        let mut ctx = context();
        ctx.warn(&node(TagKind::Tray), "something odd");
        let entry = &ctx.diagnostics.entries()[0];
        assert_eq!(entry.to_string(), "test.jwmrc[1]: something odd");
    }

    #[test]
    fn finish_returns_config_and_diagnostics() {
        let mut ctx = context();
        ctx.config.set_show_exit_confirmation(false);
        ctx.warn(&node(TagKind::Key), "x");
        let (config, diagnostics) = ctx.finish();
        assert!(!config.show_exit_confirmation);
        assert_eq!(diagnostics.len(), 1);
    }
}
