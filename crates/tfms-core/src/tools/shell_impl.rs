//! Standard shell adapter implementation.
//!
//! This module provides a concrete implementation of the `ShellAdapter` trait
//! using `std::process::Command`.

use crate::error::ProcessFailure;
use crate::tools::shell::{CommandOutput, CommandSpec, ShellAdapter};
use std::process::{Command, Stdio};

/// Standard shell adapter using `std::process::Command`.
///
/// Programs are executed directly, without a shell, with the caller's
/// standard streams inherited so tool output reaches the terminal live.
#[derive(Debug, Default)]
pub struct StdShellAdapter;

impl StdShellAdapter {
    /// Creates a new standard shell adapter.
    pub fn new() -> Self {
        Self
    }
}

impl ShellAdapter for StdShellAdapter {
    fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ProcessFailure> {
        tracing::debug!(command = %cmd, cwd = %cmd.cwd.display(), "running command");

        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .current_dir(&cmd.cwd)
            .envs(cmd.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ProcessFailure::Launch {
                program: cmd.program.clone(),
                source: e,
            })?;

        Ok(CommandOutput {
            exit_code: status.code().unwrap_or(-1),
        })
    }
}
