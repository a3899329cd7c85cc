//! Integration tests for runner configuration loading.
//!
//! Tests config file parsing, defaults, and loading behavior.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tfms_core::{RunnerConfig, TfmsError};

#[test]
fn test_config_load_defaults_when_missing() {
    let temp_dir = TempDir::new().unwrap();

    let config = RunnerConfig::load(&temp_dir.path().join("tfms.toml")).unwrap();

    assert_eq!(config, RunnerConfig::default());
    assert_eq!(config.terraform_bin, "terraform");
    assert_eq!(config.environments_dir, PathBuf::from("infra/environments"));
}

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tfms.toml");

    let config_content = r#"
terraform_bin = "/usr/local/bin/terraform"
environments_dir = "deploy/environments"
vars_dir = "../../../deploy/environments"
state_env_var = "TFMS_STATE"
strict = true
auto_approve = true
"#;
    fs::write(&path, config_content).unwrap();

    let config = RunnerConfig::load(&path).unwrap();

    assert_eq!(config.terraform_bin, "/usr/local/bin/terraform");
    assert_eq!(config.environments_dir, PathBuf::from("deploy/environments"));
    assert_eq!(config.state_env_var, "TFMS_STATE");
    assert!(config.strict);
    assert!(config.auto_approve);
    assert_eq!(
        config.environment("qa").var_file,
        PathBuf::from("../../../deploy/environments/qa/vars.tfvars")
    );
}

#[test]
fn test_config_partial_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tfms.toml");
    fs::write(&path, "strict = true\n").unwrap();

    let config = RunnerConfig::load(&path).unwrap();

    // Overridden value
    assert!(config.strict);

    // Default values preserved
    assert_eq!(config.terraform_bin, "terraform");
    assert_eq!(config.state_env_var, "TF_STATE");
    assert!(!config.auto_approve);
}

#[test]
fn test_config_invalid_toml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tfms.toml");
    fs::write(&path, "invalid { toml").unwrap();

    let result = RunnerConfig::load(&path);
    assert!(matches!(result, Err(TfmsError::ConfigParse { .. })));
}

#[test]
fn test_config_wrong_type_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tfms.toml");
    fs::write(&path, "strict = \"sometimes\"\n").unwrap();

    let result = RunnerConfig::load(&path);
    assert!(matches!(result, Err(TfmsError::ConfigParse { .. })));
}
