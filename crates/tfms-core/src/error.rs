//! Error types for tfms operations.
//!
//! This module defines every failure mode of a run, from loading the
//! environment configuration to the individual Terraform steps of a feature.
//! All errors use `thiserror` so callers get readable messages with the
//! underlying cause attached.

use crate::state::Phase;
use std::path::PathBuf;
use thiserror::Error;

/// Comprehensive error types for tfms operations.
///
/// Loading errors (`FileAccess`, `Read`, `Decode`, `ConfigParse`) are fatal
/// to a run. Feature errors (`DirectoryChange`, `BackendInit`, `Plan`,
/// `Apply`) are scoped to a single feature and never abort the batch.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TfmsError {
    // Loading errors
    /// A configuration file is missing or could not be opened.
    #[error("error reading {path}: {source}")]
    FileAccess {
        /// Path of the file that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was opened but its content could not be read as text.
    #[error("error scanning {path}: {source}")]
    Read {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The feature catalog does not have the expected shape.
    #[error("error decoding {path}: {source}")]
    Decode {
        /// Path of the catalog file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The runner configuration file is not valid TOML.
    #[error("config parse error in {path}: {source}")]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    // Feature errors
    /// The feature directory does not exist or is not a directory.
    #[error("dir change failure to {dir}: {reason}")]
    DirectoryChange {
        /// Feature directory as listed in the catalog.
        dir: PathBuf,
        /// Why the directory cannot be used.
        reason: String,
    },

    /// `terraform init` failed for a feature.
    #[error("tf backend init failure in {dir}: {source}")]
    BackendInit {
        /// Feature directory.
        dir: PathBuf,
        /// Process failure.
        #[source]
        source: ProcessFailure,
    },

    /// `terraform plan` failed for a feature.
    #[error("error running tf plan for {dir}: {source}")]
    Plan {
        /// Feature directory.
        dir: PathBuf,
        /// Process failure.
        #[source]
        source: ProcessFailure,
    },

    /// `terraform apply` failed for a feature.
    #[error("error running tf apply for {dir}: {source}")]
    Apply {
        /// Feature directory.
        dir: PathBuf,
        /// Process failure.
        #[source]
        source: ProcessFailure,
    },

    // IO and system errors
    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TfmsError {
    /// Returns the feature step this error belongs to.
    ///
    /// # Returns
    ///
    /// `Some(phase)` for per-feature errors, `None` for loading and IO errors.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            TfmsError::DirectoryChange { .. } => Some(Phase::Prepare),
            TfmsError::BackendInit { .. } => Some(Phase::Init),
            TfmsError::Plan { .. } => Some(Phase::Plan),
            TfmsError::Apply { .. } => Some(Phase::Apply),
            _ => None,
        }
    }

    /// Checks whether this error is scoped to a single feature.
    ///
    /// Feature-scoped errors are logged and the run moves on to the next feature.
    pub fn is_feature_scoped(&self) -> bool {
        self.phase().is_some()
    }
}

/// Failure of an external process invocation.
#[derive(Error, Debug)]
pub enum ProcessFailure {
    /// The process could not be started at all.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Program that was invoked.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    ///
    /// `-1` means the process was terminated by a signal.
    #[error("exit status {0}")]
    ExitCode(i32),
}

/// Result type alias for tfms operations.
///
/// All fallible tfms operations return this type, using [`TfmsError`] for error variants.
pub type Result<T> = std::result::Result<T, TfmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_errors_report_phase() {
        let err = TfmsError::Plan {
            dir: PathBuf::from("./network"),
            source: ProcessFailure::ExitCode(1),
        };
        assert_eq!(err.phase(), Some(Phase::Plan));
        assert!(err.is_feature_scoped());

        let err = TfmsError::DirectoryChange {
            dir: PathBuf::from("./missing"),
            reason: "no such directory".to_string(),
        };
        assert_eq!(err.phase(), Some(Phase::Prepare));
    }

    #[test]
    fn test_loading_errors_have_no_phase() {
        let err = TfmsError::FileAccess {
            path: PathBuf::from("infra/environments/dev/backend.tfvars"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.phase(), None);
        assert!(!err.is_feature_scoped());
    }

    #[test]
    fn test_error_message_includes_dir_and_cause() {
        let err = TfmsError::BackendInit {
            dir: PathBuf::from("./network"),
            source: ProcessFailure::ExitCode(2),
        };
        assert_eq!(
            err.to_string(),
            "tf backend init failure in ./network: exit status 2"
        );

        let err = TfmsError::Apply {
            dir: PathBuf::from("./dns"),
            source: ProcessFailure::Launch {
                program: "terraform".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            },
        };
        assert!(err.to_string().contains("./dns"));
        assert!(err.to_string().contains("failed to launch `terraform`"));
    }
}
