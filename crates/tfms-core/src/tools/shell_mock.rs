//! Mock shell adapter for testing.
//!
//! This module provides a mock implementation of the `ShellAdapter` trait
//! that returns pre-programmed results and records every invocation.

use crate::error::ProcessFailure;
use crate::tools::shell::{CommandOutput, CommandSpec, ShellAdapter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockResponse {
    Exit(CommandOutput),
    LaunchFailure,
}

/// A pre-programmed response, matched on a command line prefix and
/// optionally on the working directory.
#[derive(Debug, Clone)]
struct MockRule {
    prefix: String,
    cwd: Option<PathBuf>,
    response: MockResponse,
}

impl MockRule {
    fn matches(&self, cmd: &CommandSpec) -> bool {
        cmd.command_line().starts_with(&self.prefix)
            && self.cwd.as_ref().is_none_or(|dir| *dir == cmd.cwd)
    }
}

/// Mock shell adapter for testing.
///
/// Rules are matched against `CommandSpec::command_line()` by prefix; when
/// several rules match, the one registered last wins.
///
/// # Examples
///
/// ```
/// use tfms_core::tools::shell::{CommandOutput, CommandSpec, ShellAdapter};
/// use tfms_core::tools::shell_mock::MockShellAdapter;
///
/// let shell = MockShellAdapter::with_success();
/// shell.set_output("terraform plan", CommandOutput { exit_code: 1 });
///
/// let init = CommandSpec::new("terraform").arg("init");
/// let plan = CommandSpec::new("terraform").arg("plan");
/// assert!(shell.run(&init).unwrap().success());
/// assert!(!shell.run(&plan).unwrap().success());
/// assert_eq!(shell.get_history().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockShellAdapter {
    /// Pre-programmed responses
    rules: Arc<Mutex<Vec<MockRule>>>,
    /// History of executed commands
    history: Arc<Mutex<Vec<CommandSpec>>>,
    /// Default output for unmatched commands
    default_output: Arc<Mutex<Option<CommandOutput>>>,
}

impl MockShellAdapter {
    /// Creates a mock with no pre-programmed outputs.
    ///
    /// Unmatched commands fail to launch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that reports success for every unmatched command.
    pub fn with_success() -> Self {
        let adapter = Self::new();
        adapter.set_default_output(CommandOutput::ok());
        adapter
    }

    /// Sets the output for commands whose command line starts with `prefix`.
    pub fn set_output(&self, prefix: &str, output: CommandOutput) {
        self.push_rule(prefix, None, MockResponse::Exit(output));
    }

    /// Sets the output for matching commands run in `dir` only.
    pub fn set_output_in(&self, dir: impl AsRef<Path>, prefix: &str, output: CommandOutput) {
        self.push_rule(
            prefix,
            Some(dir.as_ref().to_path_buf()),
            MockResponse::Exit(output),
        );
    }

    /// Makes matching commands fail to launch.
    pub fn set_launch_failure(&self, prefix: &str) {
        self.push_rule(prefix, None, MockResponse::LaunchFailure);
    }

    /// Sets the default output for unmatched commands.
    pub fn set_default_output(&self, output: CommandOutput) {
        *self.default_output.lock().unwrap() = Some(output);
    }

    /// Returns the executed commands in order.
    pub fn get_history(&self) -> Vec<CommandSpec> {
        self.history.lock().unwrap().clone()
    }

    /// Returns the number of executed commands whose command line starts with `prefix`.
    pub fn command_count(&self, prefix: &str) -> usize {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.command_line().starts_with(prefix))
            .count()
    }

    /// Clears command history.
    pub fn clear_history(&self) {
        self.history.lock().unwrap().clear();
    }

    fn push_rule(&self, prefix: &str, cwd: Option<PathBuf>, response: MockResponse) {
        self.rules.lock().unwrap().push(MockRule {
            prefix: prefix.to_string(),
            cwd,
            response,
        });
    }
}

impl ShellAdapter for MockShellAdapter {
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessFailure> {
        self.history.lock().unwrap().push(cmd.clone());

        let rule = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.matches(cmd))
            .map(|r| r.response.clone());

        let launch_failure = || ProcessFailure::Launch {
            program: cmd.program.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no output configured"),
        };

        match rule {
            Some(MockResponse::Exit(output)) => Ok(output),
            Some(MockResponse::LaunchFailure) => Err(launch_failure()),
            None => {
                let default = *self.default_output.lock().unwrap();
                default.ok_or_else(launch_failure)
            }
        }
    }
}
