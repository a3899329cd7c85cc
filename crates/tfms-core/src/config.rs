//! Configuration types for the tfms runner.
//!
//! This module defines the runner configuration, loaded from an optional
//! `tfms.toml` with defaults applied for missing values, and the per-environment
//! path layout derived from it.

use crate::error::{Result, TfmsError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default runner configuration file name, looked up in the invocation directory.
pub const DEFAULT_CONFIG_FILE: &str = "tfms.toml";

/// File name of the backend settings inside an environment directory.
pub const BACKEND_CONFIG_FILE: &str = "backend.tfvars";

/// File name of the feature catalog inside an environment directory.
pub const FEATURES_FILE: &str = "features.json";

/// File name of the Terraform variables inside an environment directory.
pub const VARS_FILE: &str = "vars.tfvars";

/// Main runner configuration.
///
/// Every field has a default, so an absent or partial `tfms.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Terraform executable, resolved through `PATH` unless absolute.
    pub terraform_bin: String,

    /// Directory holding one sub-directory per environment, relative to the
    /// invocation directory.
    pub environments_dir: PathBuf,

    /// Environments directory as seen from inside a feature directory.
    ///
    /// Used to build the `-var-file` argument for plan and apply.
    pub vars_dir: PathBuf,

    /// Environment variable carrying the feature's state file key.
    pub state_env_var: String,

    /// Exit non-zero when any feature failed.
    pub strict: bool,

    /// Confirm every apply without prompting.
    pub auto_approve: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            terraform_bin: "terraform".to_string(),
            environments_dir: PathBuf::from("infra/environments"),
            vars_dir: PathBuf::from("../../environments"),
            state_env_var: "TF_STATE".to_string(),
            strict: false,
            auto_approve: false,
        }
    }
}

impl RunnerConfig {
    /// Loads the configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or the defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `TfmsError::FileAccess` if the file exists but cannot be read,
    /// or `TfmsError::ConfigParse` if it is not valid TOML for this structure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no runner config, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(TfmsError::FileAccess {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        toml::from_str(&content).map_err(|e| TfmsError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Resolves the file layout of an environment.
    ///
    /// # Arguments
    ///
    /// * `environment` - Environment name (e.g. `dev`).
    pub fn environment(&self, environment: &str) -> EnvironmentPaths {
        let dir = self.environments_dir.join(environment);
        EnvironmentPaths {
            name: environment.to_string(),
            backend_config: dir.join(BACKEND_CONFIG_FILE),
            features_file: dir.join(FEATURES_FILE),
            var_file: self.vars_dir.join(environment).join(VARS_FILE),
            dir,
        }
    }
}

/// File layout of one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPaths {
    /// Environment name.
    pub name: String,

    /// Environment directory, e.g. `infra/environments/dev`.
    pub dir: PathBuf,

    /// Backend settings, e.g. `infra/environments/dev/backend.tfvars`.
    pub backend_config: PathBuf,

    /// Feature catalog, e.g. `infra/environments/dev/features.json`.
    pub features_file: PathBuf,

    /// Variables file relative to a feature directory, e.g.
    /// `../../environments/dev/vars.tfvars`.
    pub var_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_environment_layout() {
        let config = RunnerConfig::default();
        let env = config.environment("dev");

        assert_eq!(env.name, "dev");
        assert_eq!(env.dir, PathBuf::from("infra/environments/dev"));
        assert_eq!(
            env.backend_config,
            PathBuf::from("infra/environments/dev/backend.tfvars")
        );
        assert_eq!(
            env.features_file,
            PathBuf::from("infra/environments/dev/features.json")
        );
        assert_eq!(
            env.var_file,
            PathBuf::from("../../environments/dev/vars.tfvars")
        );
    }

    #[test]
    fn test_custom_environments_dir() {
        let config = RunnerConfig {
            environments_dir: PathBuf::from("deploy/envs"),
            ..RunnerConfig::default()
        };
        let env = config.environment("prod");

        assert_eq!(env.dir, PathBuf::from("deploy/envs/prod"));
        assert_eq!(
            env.backend_config,
            PathBuf::from("deploy/envs/prod/backend.tfvars")
        );
    }

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.terraform_bin, "terraform");
        assert_eq!(config.state_env_var, "TF_STATE");
        assert!(!config.strict);
        assert!(!config.auto_approve);
    }
}
