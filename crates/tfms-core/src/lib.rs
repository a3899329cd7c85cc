//! tfms core - Terraform multi-state runner.
//!
//! This crate runs Terraform across the independently-stated features of a
//! deployment environment: for every feature it points the S3 backend at the
//! feature's own state file, plans, and applies once the plan is confirmed.
//!
//! # Architecture
//!
//! - [`error`]: Error types and result type alias
//! - [`config`]: Runner configuration and environment file layout
//! - [`backend`]: `backend.tfvars` reader
//! - [`features`]: `features.json` reader
//! - [`state`]: Steps, per-feature outcomes and the run report
//! - [`tools`]: File system, shell and confirmation adapters
//! - [`workflows`]: The per-feature init / plan / apply workflow
//! - [`runtime`]: The environment runner
//!
//! # Example
//!
//! ```rust,ignore
//! use tfms_core::{Runner, RunnerConfig};
//!
//! let runner = Runner::new(RunnerConfig::default());
//! let report = runner.run_environment("dev")?;
//! std::process::exit(report.exit_code(runner.config.strict));
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod features;
pub mod runtime;
pub mod state;
pub mod tools;
pub mod workflows;

// Re-export core types for convenience
pub use backend::BackendConfig;
pub use config::{EnvironmentPaths, RunnerConfig};
pub use error::{ProcessFailure, Result, TfmsError};
pub use features::Feature;
pub use runtime::Runner;
pub use state::{FeatureOutcome, FeatureResult, Phase, RunReport};
pub use tools::ToolRegistry;
