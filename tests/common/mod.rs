// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed configuration tree, a fluent builder
// for writing fixture files into it, and a canned executor so `exec:` menu
// includes can be tested without a shell.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

use jwmrc::error::LoadError;
use jwmrc::exec::{ExecResult, Executor, SystemExecutor};
use jwmrc::loader::{self, LoadOutcome, LoaderOptions};

/// Name of the primary configuration file inside the test directory.
pub const PRIMARY: &str = "jwmrc";

/// Name of the fallback configuration file inside the test directory.
pub const FALLBACK: &str = "system.jwmrc";

/// An isolated configuration directory backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding the fixture files.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new, empty context.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        Self { root }
    }

    /// Path to the directory root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of `name` inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Loader options pointing at the primary and fallback files of this
    /// directory.
    pub fn options(&self) -> LoaderOptions {
        LoaderOptions {
            config_path: self.path(PRIMARY),
            fallback_path: self.path(FALLBACK),
            ..LoaderOptions::default()
        }
    }

    /// Load with `executor`, returning the fatal error if there is one.
    pub fn try_load_with(&self, executor: Box<dyn Executor>) -> Result<LoadOutcome, LoadError> {
        loader::load(self.options(), executor)
    }

    /// Load with real processes for `exec:` includes.
    pub fn load(&self) -> LoadOutcome {
        self.try_load_with(Box::new(SystemExecutor)).expect("load configuration")
    }

    /// Load, serving `exec:` includes from `executor`.
    pub fn load_with(&self, executor: CannedExecutor) -> LoadOutcome {
        self.try_load_with(Box::new(executor)).expect("load configuration")
    }

    /// Rendered diagnostics with the temporary directory replaced by `<dir>`.
    pub fn messages(&self, outcome: &LoadOutcome) -> Vec<String> {
        let dir = self.root.path().display().to_string();
        outcome
            .diagnostics
            .iter()
            .map(|d| d.to_string().replace(&dir, "<dir>"))
            .collect()
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new, empty context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write the primary configuration file.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(PRIMARY, content)
    }

    /// Write the fallback configuration file.
    pub fn with_fallback(self, content: &str) -> Self {
        self.with_file(FALLBACK, content)
    }

    /// Write `content` to `name`. Every `{dir}` in `content` is replaced with
    /// the absolute path of the test directory so fixtures can include each
    /// other.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let dir = self.ctx.root.path().display().to_string();
        let path = self.ctx.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture parent");
        }
        std::fs::write(&path, content.replace("{dir}", &dir)).expect("write fixture file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Serves queued stdout in FIFO order and records every command line.
///
/// Once the queue is empty every call fails to spawn.
#[derive(Debug, Default)]
pub struct CannedExecutor {
    outputs: RefCell<VecDeque<ExecResult>>,
    calls: RefCell<Vec<String>>,
}

impl CannedExecutor {
    /// Queue a response with `stdout` and exit `code`.
    pub fn then_output(self, stdout: &str, code: i32) -> Self {
        self.outputs.borrow_mut().push_back(ExecResult {
            stdout: stdout.to_string(),
            stderr: String::new(),
            success: code == 0,
            code: Some(code),
        });
        self
    }
}

impl Executor for CannedExecutor {
    fn run_shell(&self, _shell: &str, command: &str) -> io::Result<ExecResult> {
        self.calls.borrow_mut().push(command.to_string());
        self.outputs
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no canned output"))
    }
}
