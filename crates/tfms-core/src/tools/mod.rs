//! Tool adapters and registry for tfms runs.
//!
//! Every side effect of a run goes through one of three adapters: file system
//! reads, external process execution, and apply confirmation. Each adapter
//! trait has a standard implementation and a mock for tests.

pub mod confirm;
pub mod confirm_impl;
pub mod confirm_mock;
pub mod fs;
pub mod fs_impl;
pub mod fs_mock;
pub mod shell;
pub mod shell_impl;
pub mod shell_mock;

/// Tool registry that owns all adapters of a run.
///
/// Adapters are trait objects so the runner can be driven by real or mock
/// implementations.
pub struct ToolRegistry {
    /// File system adapter for configuration reads.
    pub fs: Box<dyn fs::FsAdapter>,

    /// Shell adapter for Terraform invocations.
    pub shell: Box<dyn shell::ShellAdapter>,

    /// Confirmation adapter gating apply.
    pub confirm: Box<dyn confirm::Confirm>,
}

impl ToolRegistry {
    /// Creates a new tool registry with the provided adapters.
    ///
    /// # Arguments
    ///
    /// * `fs` - File system adapter implementation.
    /// * `shell` - Shell adapter implementation.
    /// * `confirm` - Confirmation adapter implementation.
    pub fn new(
        fs: Box<dyn fs::FsAdapter>,
        shell: Box<dyn shell::ShellAdapter>,
        confirm: Box<dyn confirm::Confirm>,
    ) -> Self {
        Self { fs, shell, confirm }
    }

    /// Creates a registry backed by the real file system and processes.
    ///
    /// # Arguments
    ///
    /// * `auto_approve` - Confirm every apply instead of prompting on the terminal.
    pub fn standard(auto_approve: bool) -> Self {
        let confirm: Box<dyn confirm::Confirm> = if auto_approve {
            Box::new(confirm_impl::AutoConfirmer::new())
        } else {
            Box::new(confirm_impl::PromptConfirmer::stdio())
        };

        Self::new(
            Box::new(fs_impl::StdFsAdapter::new()),
            Box::new(shell_impl::StdShellAdapter::new()),
            confirm,
        )
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("fs", &"Box<dyn FsAdapter>")
            .field("shell", &"Box<dyn ShellAdapter>")
            .field("confirm", &"Box<dyn Confirm>")
            .finish()
    }
}
