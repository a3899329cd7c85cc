//! tfms CLI - Terraform multi-state runner
//!
//! Runs `terraform init`, `plan` and a confirmed `apply` for every feature of
//! a deployment environment, each against its own remote state file.

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use tfms_core::config::DEFAULT_CONFIG_FILE;
use tfms_core::{FeatureOutcome, RunReport, Runner, RunnerConfig};

/// Usage line printed when the arguments are not exactly one environment.
const USAGE: &str = "usage: tfms [OPTIONS] <environment>";

/// tfms - Terraform multi-state runner
///
/// Reads infra/environments/<environment>/backend.tfvars and features.json,
/// then runs init, plan and apply for each feature in catalog order.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Environment name (a directory under infra/environments)
    environment: String,

    /// Runner configuration file [default: tfms.toml if present]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Apply every feature without asking for confirmation
    #[arg(short = 'y', long)]
    yes: bool,

    /// Exit with status 1 when any feature failed
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    // Parse CLI arguments; anything but a single environment is a usage error
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", USAGE);
            std::process::exit(1);
        }
    };

    // Initialize tracing subscriber for structured logging
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for structured logging
///
/// Logs go to stderr; stdout carries Terraform output and the apply prompt.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("tfms=debug,tfms_core=debug")
    } else {
        EnvFilter::new("tfms=info,tfms_core=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one environment and return the process exit code
fn run(cli: Cli) -> Result<i32> {
    let mut config = load_config(cli.config.as_ref())?;
    if cli.strict {
        config.strict = true;
    }
    if cli.yes {
        config.auto_approve = true;
    }

    let runner = Runner::new(config);
    let report = runner
        .run_environment(&cli.environment)
        .with_context(|| format!("Failed to load environment '{}'", cli.environment))?;

    print_summary(&report);
    println!("terraform completed successfully {}.", report.environment);

    if runner.config.strict && report.has_failures() {
        eprintln!("{} of {} feature(s) failed", report.failed(), report.results.len());
    }
    Ok(report.exit_code(runner.config.strict))
}

/// Load the runner configuration
///
/// An explicit `--config` must exist; the default `tfms.toml` is optional.
fn load_config(path: Option<&PathBuf>) -> Result<RunnerConfig> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            path.clone()
        }
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    tracing::debug!(path = %path.display(), "loading runner configuration");

    RunnerConfig::load(&path)
        .with_context(|| format!("Failed to load runner configuration from {}", path.display()))
}

/// Print one line per feature
fn print_summary(report: &RunReport) {
    for result in &report.results {
        match &result.outcome {
            Ok(FeatureOutcome::Applied) => println!("✔ {}: applied", result.name),
            Ok(FeatureOutcome::ApplyDeclined) => {
                println!("- {}: Apply cancelled by user.", result.name)
            }
            Err(e) => {
                let phase = e.phase().map(|p| p.as_str()).unwrap_or("run");
                println!("✘ {}: {} failed: {}", result.name, phase, e)
            }
        }
    }
}
