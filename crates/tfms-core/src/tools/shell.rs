//! Shell adapter trait and operations.
//!
//! This module defines the `ShellAdapter` trait for running external programs,
//! allowing for both real process execution and mock implementations for testing.

use crate::error::ProcessFailure;
use std::fmt;
use std::path::{Path, PathBuf};

/// Description of one external program invocation.
///
/// The working directory is always explicit: commands never depend on the
/// current directory of the calling process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute.
    pub program: String,

    /// Arguments, passed verbatim (no shell interpretation).
    pub args: Vec<String>,

    /// Working directory for the process.
    pub cwd: PathBuf,

    /// Extra environment variables, added on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Creates a command running `program` in the current directory.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: PathBuf::from("."),
            env: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = dir.as_ref().to_path_buf();
        self
    }

    /// Adds an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Returns the value of an added environment variable.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Program and arguments joined by spaces, for logging and matching.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Command output.
///
/// Standard streams are inherited from the caller, so only the exit code is
/// reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code from the command; `-1` when it was terminated by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    /// Output of a command that exited with code 0.
    pub fn ok() -> Self {
        Self { exit_code: 0 }
    }

    /// Checks if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Converts a non-zero exit into a `ProcessFailure`.
    pub fn into_result(self) -> Result<(), ProcessFailure> {
        if self.success() {
            Ok(())
        } else {
            Err(ProcessFailure::ExitCode(self.exit_code))
        }
    }
}

/// Shell adapter trait.
///
/// Implementations can execute real processes or record invocations for tests.
pub trait ShellAdapter: Send + Sync {
    /// Runs a command to completion with stdin, stdout and stderr inherited.
    ///
    /// # Arguments
    ///
    /// * `cmd` - Program, arguments, working directory and extra environment.
    ///
    /// # Returns
    ///
    /// The exit code of the finished process.
    ///
    /// # Errors
    ///
    /// Returns `ProcessFailure::Launch` if the process cannot be started. A
    /// non-zero exit is not an error here; check `CommandOutput::success()`.
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_builder() {
        let cmd = CommandSpec::new("terraform")
            .arg("plan")
            .args(["-var-file=vars.tfvars"])
            .current_dir("./network")
            .env("TF_STATE", "network.tfstate");

        assert_eq!(cmd.command_line(), "terraform plan -var-file=vars.tfvars");
        assert_eq!(cmd.to_string(), cmd.command_line());
        assert_eq!(cmd.cwd, PathBuf::from("./network"));
        assert_eq!(cmd.env_var("TF_STATE"), Some("network.tfstate"));
        assert_eq!(cmd.env_var("HOME"), None);
    }

    #[test]
    fn test_command_output_result() {
        assert!(CommandOutput::ok().success());
        assert!(CommandOutput::ok().into_result().is_ok());

        let failed = CommandOutput { exit_code: 3 };
        assert!(!failed.success());
        assert!(matches!(
            failed.into_result(),
            Err(ProcessFailure::ExitCode(3))
        ));
    }
}
