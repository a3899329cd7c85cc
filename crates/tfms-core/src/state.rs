//! Run state for tfms.
//!
//! This module defines the per-feature step vocabulary, the outcome of a
//! single feature, and the report collected over a whole environment run.

use crate::error::TfmsError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Steps a feature goes through.
///
/// Steps are sequential; a failure in one step skips all later steps of the
/// same feature.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Feature directory check.
    Prepare,

    /// `terraform init` with backend reconfiguration.
    Init,

    /// `terraform plan`.
    Plan,

    /// `terraform apply`, only after confirmation.
    Apply,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Prepare => "prepare",
            Phase::Init => "init",
            Phase::Plan => "plan",
            Phase::Apply => "apply",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prepare" => Ok(Phase::Prepare),
            "init" => Ok(Phase::Init),
            "plan" => Ok(Phase::Plan),
            "apply" => Ok(Phase::Apply),
            _ => Err(format!("invalid phase: {}", s)),
        }
    }
}

/// Successful outcome of a single feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureOutcome {
    /// Init, plan and apply all succeeded.
    Applied,

    /// Init and plan succeeded; apply was not confirmed.
    ApplyDeclined,
}

/// Result of one feature within a run.
#[derive(Debug)]
pub struct FeatureResult {
    /// Feature name from the catalog.
    pub name: String,

    /// Feature directory from the catalog.
    pub dir: PathBuf,

    /// What happened to the feature.
    pub outcome: Result<FeatureOutcome, TfmsError>,
}

impl FeatureResult {
    /// Checks if the feature completed without error.
    ///
    /// A declined apply counts as success.
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Report for a whole environment run.
///
/// Results are kept in catalog order.
#[derive(Debug)]
pub struct RunReport {
    /// Environment name the run was started for.
    pub environment: String,

    /// When the first feature started.
    pub started_at: DateTime<Utc>,

    /// When the last feature finished.
    pub finished_at: DateTime<Utc>,

    /// Per-feature results in execution order.
    pub results: Vec<FeatureResult>,
}

impl RunReport {
    /// Creates an empty report for the given environment, started now.
    pub fn new(environment: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            environment: environment.into(),
            started_at: now,
            finished_at: now,
            results: Vec::new(),
        }
    }

    /// Appends a feature result.
    pub fn record(&mut self, result: FeatureResult) {
        self.results.push(result);
    }

    /// Marks the run as finished now.
    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    /// Number of features whose apply ran successfully.
    pub fn applied(&self) -> usize {
        self.count(|r| matches!(r.outcome, Ok(FeatureOutcome::Applied)))
    }

    /// Number of features where apply was declined.
    pub fn declined(&self) -> usize {
        self.count(|r| matches!(r.outcome, Ok(FeatureOutcome::ApplyDeclined)))
    }

    /// Number of features that failed.
    pub fn failed(&self) -> usize {
        self.count(|r| r.outcome.is_err())
    }

    /// Checks whether any feature failed.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Process exit code for this report.
    ///
    /// # Arguments
    ///
    /// * `strict` - Whether feature failures should fail the process.
    ///
    /// # Returns
    ///
    /// `1` when `strict` is set and a feature failed, `0` otherwise.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.has_failures() { 1 } else { 0 }
    }

    fn count(&self, pred: impl Fn(&FeatureResult) -> bool) -> usize {
        self.results.iter().filter(|r| pred(*r)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessFailure;

    fn result(name: &str, outcome: Result<FeatureOutcome, TfmsError>) -> FeatureResult {
        FeatureResult {
            name: name.to_string(),
            dir: PathBuf::from(format!("./{}", name)),
            outcome,
        }
    }

    #[test]
    fn test_should_convert_phase_to_string() {
        assert_eq!(Phase::Prepare.as_str(), "prepare");
        assert_eq!(Phase::Init.as_str(), "init");
        assert_eq!(Phase::Plan.as_str(), "plan");
        assert_eq!(Phase::Apply.as_str(), "apply");
    }

    #[test]
    fn test_should_parse_phase_from_string() {
        assert_eq!("prepare".parse::<Phase>(), Ok(Phase::Prepare));
        assert_eq!("init".parse::<Phase>(), Ok(Phase::Init));
        assert_eq!("plan".parse::<Phase>(), Ok(Phase::Plan));
        assert_eq!("apply".parse::<Phase>(), Ok(Phase::Apply));
        assert!("destroy".parse::<Phase>().is_err());
    }

    #[test]
    fn test_should_display_phase() {
        assert_eq!(format!("{}", Phase::Init), "init");
        assert_eq!(format!("{}", Phase::Apply), "apply");
    }

    #[test]
    fn test_should_count_outcomes() {
        let mut report = RunReport::new("dev");
        report.record(result("a", Ok(FeatureOutcome::Applied)));
        report.record(result("b", Ok(FeatureOutcome::ApplyDeclined)));
        report.record(result(
            "c",
            Err(TfmsError::Plan {
                dir: PathBuf::from("./c"),
                source: ProcessFailure::ExitCode(1),
            }),
        ));
        report.finish();

        assert_eq!(report.applied(), 1);
        assert_eq!(report.declined(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
        assert!(report.finished_at >= report.started_at);
        assert!(report.results[1].success());
        assert!(!report.results[2].success());
    }

    #[test]
    fn test_exit_code_only_fails_in_strict_mode() {
        let mut report = RunReport::new("dev");
        report.record(result(
            "a",
            Err(TfmsError::DirectoryChange {
                dir: PathBuf::from("./a"),
                reason: "missing".to_string(),
            }),
        ));

        assert_eq!(report.exit_code(false), 0);
        assert_eq!(report.exit_code(true), 1);
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = RunReport::new("dev");
        assert!(!report.has_failures());
        assert_eq!(report.exit_code(true), 0);
    }
}
