//! Runner for tfms environment runs.
//!
//! This module provides the `Runner` which loads an environment's backend
//! settings and feature catalog, then drives every feature through the
//! execute workflow in catalog order.

use crate::backend::read_backend_config;
use crate::config::RunnerConfig;
use crate::error::Result;
use crate::features::read_features;
use crate::state::{FeatureResult, RunReport};
use crate::tools::ToolRegistry;
use crate::workflows::{ExecutionContext, execute_feature};

/// Environment runner.
///
/// # Examples
///
/// ```no_run
/// use tfms_core::{Runner, RunnerConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let runner = Runner::new(RunnerConfig::default());
/// let report = runner.run_environment("dev")?;
/// println!("{} feature(s) failed", report.failed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Runner {
    /// Runner configuration.
    pub config: RunnerConfig,

    /// Tool registry for file system, shell and confirmation.
    pub tools: ToolRegistry,
}

impl Runner {
    /// Creates a runner using the real file system, processes and terminal.
    pub fn new(config: RunnerConfig) -> Self {
        let tools = ToolRegistry::standard(config.auto_approve);
        Self::with_tools(config, tools)
    }

    /// Creates a runner with the given adapters.
    pub fn with_tools(config: RunnerConfig, tools: ToolRegistry) -> Self {
        Self { config, tools }
    }

    /// Runs every feature of an environment.
    ///
    /// Backend settings and the feature catalog are loaded first; a failure
    /// there aborts the run before any Terraform command. After that, a failing
    /// feature is logged and recorded, and the run continues with the next
    /// one.
    ///
    /// # Arguments
    ///
    /// * `environment` - Environment name, e.g. `dev`.
    ///
    /// # Returns
    ///
    /// The report with one result per feature, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `TfmsError::FileAccess`, `TfmsError::Read` or `TfmsError::Decode`
    /// when the environment configuration cannot be loaded.
    #[tracing::instrument(skip(self))]
    pub fn run_environment(&self, environment: &str) -> Result<RunReport> {
        let paths = self.config.environment(environment);
        let backend = read_backend_config(self.tools.fs.as_ref(), &paths.backend_config)?;
        let features = read_features(self.tools.fs.as_ref(), &paths.features_file)?;

        tracing::info!(features = features.len(), "executing tf for env");

        let ctx = ExecutionContext {
            config: &self.config,
            environment: &paths,
            backend: &backend,
        };

        let mut report = RunReport::new(environment);
        for feature in &features {
            let outcome = execute_feature(
                &ctx,
                feature,
                self.tools.fs.as_ref(),
                self.tools.shell.as_ref(),
                self.tools.confirm.as_ref(),
            );

            if let Err(e) = &outcome {
                tracing::error!(
                    feature = %feature.name,
                    phase = e.phase().map(|p| p.as_str()).unwrap_or("unknown"),
                    "{}",
                    e
                );
            }

            report.record(FeatureResult {
                name: feature.name.clone(),
                dir: feature.dir.clone(),
                outcome,
            });
        }
        report.finish();

        tracing::info!(
            applied = report.applied(),
            declined = report.declined(),
            failed = report.failed(),
            "environment run finished"
        );
        Ok(report)
    }
}
