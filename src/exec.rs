//! Process execution for command-sourced includes.
use std::fmt::Debug;
use std::io;
use std::process::{Command, Output, Stdio};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs shell command lines on behalf of the include resolver.
///
/// The loader only ever talks to this trait so tests can substitute canned
/// output for real processes.
pub trait Executor: Debug {
    /// Run `command` through `shell -c` and wait for it to finish.
    ///
    /// The exit status is reported in the result but is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started.
    fn run_shell(&self, shell: &str, command: &str) -> io::Result<ExecResult>;
}

/// [`Executor`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_shell(&self, shell: &str, command: &str) -> io::Result<ExecResult> {
        let output = Command::new(shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()?;
        Ok(ExecResult::from(output))
    }
}

/// Canned executor for unit and integration tests.
#[cfg(test)]
pub mod test_helpers {
    use super::{ExecResult, Executor};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;

    /// Serves queued responses in FIFO order and records every command line.
    ///
    /// A `None` response simulates a spawn failure. When the queue is empty
    /// any call fails to spawn.
    #[derive(Debug, Default)]
    pub struct MockExecutor {
        responses: RefCell<VecDeque<Option<ExecResult>>>,
        calls: RefCell<Vec<String>>,
    }

    impl MockExecutor {
        /// A mock whose single call succeeds with `stdout`.
        #[must_use]
        pub fn ok(stdout: &str) -> Self {
            Self::default().then_output(stdout, Some(0))
        }

        /// A mock whose single call cannot be spawned.
        #[must_use]
        pub fn spawn_failure() -> Self {
            Self::default().then_spawn_failure()
        }

        /// Queue a response with the given stdout and exit code.
        #[must_use]
        pub fn then_output(self, stdout: &str, code: Option<i32>) -> Self {
            self.responses.borrow_mut().push_back(Some(ExecResult {
                stdout: stdout.to_string(),
                stderr: String::new(),
                success: code == Some(0),
                code,
            }));
            self
        }

        /// Queue a spawn failure.
        #[must_use]
        pub fn then_spawn_failure(self) -> Self {
            self.responses.borrow_mut().push_back(None);
            self
        }

        /// Command lines received so far.
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Executor for MockExecutor {
        fn run_shell(&self, _shell: &str, command: &str) -> io::Result<ExecResult> {
            self.calls.borrow_mut().push(command.to_string());
            self.responses
                .borrow_mut()
                .pop_front()
                .flatten()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "mock spawn failure"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::test_helpers::MockExecutor;
    use super::*;

    #[cfg(unix)]
    #[test]
    fn system_executor_captures_stdout() {
        let result = SystemExecutor.run_shell("/bin/sh", "echo hello").unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn system_executor_reports_nonzero_exit_without_error() {
        let result = SystemExecutor
            .run_shell("/bin/sh", "echo partial; exit 3")
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.code, Some(3));
        assert_eq!(result.stdout.trim(), "partial");
    }

    #[test]
    fn system_executor_missing_shell_is_spawn_error() {
        let result = SystemExecutor.run_shell("/this/shell/does/not/exist-12345", "true");
        assert!(result.is_err());
    }

    #[test]
    fn mock_serves_responses_in_order() {
        let mock = MockExecutor::ok("first").then_output("second", Some(1));
        assert_eq!(mock.run_shell("sh", "a").unwrap().stdout, "first");
        let second = mock.run_shell("sh", "b").unwrap();
        assert_eq!(second.stdout, "second");
        assert!(!second.success);
        assert!(mock.run_shell("sh", "c").is_err());
        assert_eq!(mock.calls(), vec!["a", "b", "c"]);
    }

    #[test]
    fn mock_spawn_failure() {
        assert!(MockExecutor::spawn_failure().run_shell("sh", "x").is_err());
    }
}
