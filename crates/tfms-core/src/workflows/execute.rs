//! Per-feature Terraform workflow.
//!
//! For one feature this workflow reconfigures the backend to the feature's own
//! state file, plans against the environment's variables, and applies once the
//! plan is confirmed. Commands run with the feature directory as their working
//! directory; the calling process never changes directory.

use crate::backend::BackendConfig;
use crate::config::{EnvironmentPaths, RunnerConfig};
use crate::error::{ProcessFailure, Result, TfmsError};
use crate::features::Feature;
use crate::state::FeatureOutcome;
use crate::tools::confirm::Confirm;
use crate::tools::fs::FsAdapter;
use crate::tools::shell::{CommandSpec, ShellAdapter};

/// Everything shared by the features of one environment run.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// Runner configuration.
    pub config: &'a RunnerConfig,

    /// Environment file layout.
    pub environment: &'a EnvironmentPaths,

    /// Backend settings from `backend.tfvars`.
    pub backend: &'a BackendConfig,
}

impl ExecutionContext<'_> {
    fn terraform(&self, feature: &Feature, subcommand: &str) -> CommandSpec {
        CommandSpec::new(&self.config.terraform_bin)
            .arg(subcommand)
            .current_dir(&feature.dir)
            .env(&self.config.state_env_var, &feature.state_file)
    }

    fn var_file_arg(&self) -> String {
        format!("-var-file={}", self.environment.var_file.display())
    }
}

/// Builds the `terraform init` invocation for a feature.
///
/// The backend `key` is always the feature's state file, whatever
/// `backend.tfvars` says.
pub fn init_command(ctx: &ExecutionContext<'_>, feature: &Feature) -> CommandSpec {
    let backend = ctx.backend;
    ctx.terraform(feature, "init")
        .args([
            format!("-backend-config=bucket={}", backend.bucket),
            format!("-backend-config=key={}", feature.state_file),
            format!("-backend-config=region={}", backend.region),
            format!("-backend-config=profile={}", backend.profile),
            format!("-backend-config=dynamodb_table={}", backend.dynamodb_table),
        ])
        .arg("-reconfigure")
}

/// Builds the `terraform plan` invocation for a feature.
pub fn plan_command(ctx: &ExecutionContext<'_>, feature: &Feature) -> CommandSpec {
    ctx.terraform(feature, "plan").arg(ctx.var_file_arg())
}

/// Builds the `terraform apply` invocation for a feature.
pub fn apply_command(ctx: &ExecutionContext<'_>, feature: &Feature) -> CommandSpec {
    ctx.terraform(feature, "apply")
        .arg("-auto-approve")
        .arg(ctx.var_file_arg())
}

/// Runs init, plan and, if confirmed, apply for one feature.
///
/// This workflow:
/// 1. Checks that the feature directory exists
/// 2. Runs `terraform init` against the feature's state file
/// 3. Runs `terraform plan` with the environment's variables
/// 4. Asks `confirm` whether to apply
/// 5. Runs `terraform apply -auto-approve` when confirmed
///
/// Each step runs only if the previous one succeeded.
///
/// # Arguments
///
/// * `ctx` - Configuration, environment layout and backend settings
/// * `feature` - Feature to deploy
/// * `fs` - File system adapter, used for the directory check
/// * `shell` - Shell adapter running Terraform
/// * `confirm` - Confirmation adapter gating apply
///
/// # Returns
///
/// `FeatureOutcome::Applied` when apply ran, `FeatureOutcome::ApplyDeclined`
/// when it was not confirmed. A failure to obtain an answer counts as a
/// refusal.
///
/// # Errors
///
/// Returns:
/// - `TfmsError::DirectoryChange` if the feature directory is missing
/// - `TfmsError::BackendInit` if init fails to launch or exits non-zero
/// - `TfmsError::Plan` if plan fails to launch or exits non-zero
/// - `TfmsError::Apply` if apply fails to launch or exits non-zero
#[tracing::instrument(skip_all, fields(feature = %feature.name, dir = %feature.dir.display()))]
pub fn execute_feature(
    ctx: &ExecutionContext<'_>,
    feature: &Feature,
    fs: &dyn FsAdapter,
    shell: &dyn ShellAdapter,
    confirm: &dyn Confirm,
) -> Result<FeatureOutcome> {
    tracing::info!("executing tf for feature");

    if !fs.is_dir(&feature.dir) {
        let reason = if fs.exists(&feature.dir) {
            "not a directory"
        } else {
            "no such directory"
        };
        return Err(TfmsError::DirectoryChange {
            dir: feature.dir.clone(),
            reason: reason.to_string(),
        });
    }

    run_step(shell, &init_command(ctx, feature)).map_err(|source| TfmsError::BackendInit {
        dir: feature.dir.clone(),
        source,
    })?;
    tracing::info!("tf backend init successful");

    run_step(shell, &plan_command(ctx, feature)).map_err(|source| TfmsError::Plan {
        dir: feature.dir.clone(),
        source,
    })?;
    tracing::info!("tf plan run successfully");

    let confirmed = confirm.confirm(feature).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read confirmation");
        false
    });
    if !confirmed {
        tracing::info!("Apply cancelled by user.");
        return Ok(FeatureOutcome::ApplyDeclined);
    }

    run_step(shell, &apply_command(ctx, feature)).map_err(|source| TfmsError::Apply {
        dir: feature.dir.clone(),
        source,
    })?;
    tracing::info!("tf apply run successfully");

    Ok(FeatureOutcome::Applied)
}

fn run_step(shell: &dyn ShellAdapter, cmd: &CommandSpec) -> std::result::Result<(), ProcessFailure> {
    tracing::debug!(command = %cmd, "running terraform");
    shell.run(cmd)?.into_result()
}
