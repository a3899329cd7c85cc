//! Backend settings reader.
//!
//! An environment's `backend.tfvars` holds the S3 backend settings shared by
//! all of its features, one `key = "value"` assignment per line. Parsing is
//! lenient: unknown keys and lines without `=` are ignored, and absent keys
//! stay empty so Terraform gets to report what is actually missing.

use crate::error::Result;
use crate::tools::fs::FsAdapter;
use std::path::Path;

/// Remote state backend settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    /// S3 bucket holding the state files.
    pub bucket: String,

    /// State object key. Overridden per feature by its state file.
    pub key: String,

    /// Bucket region.
    pub region: String,

    /// Credential profile passed through to the backend.
    pub profile: String,

    /// DynamoDB table used for state locking.
    pub dynamodb_table: String,
}

impl BackendConfig {
    /// Recognized setting names, in the order they are passed to `terraform init`.
    pub const KEYS: [&'static str; 5] = ["bucket", "key", "region", "profile", "dynamodb_table"];

    /// Parses `key = "value"` lines.
    ///
    /// Each line is split on its first `=`. Both sides are trimmed and the
    /// value loses its surrounding double quotes.
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"').to_string();

            match key.trim() {
                "bucket" => config.bucket = value,
                "key" => config.key = value,
                "region" => config.region = value,
                "profile" => config.profile = value,
                "dynamodb_table" => config.dynamodb_table = value,
                _ => {}
            }
        }

        config
    }

    /// Returns the value of a recognized setting.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "bucket" => Some(&self.bucket),
            "key" => Some(&self.key),
            "region" => Some(&self.region),
            "profile" => Some(&self.profile),
            "dynamodb_table" => Some(&self.dynamodb_table),
            _ => None,
        }
    }

    /// Lists recognized settings that are empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        Self::KEYS
            .into_iter()
            .filter(|k| self.get(k).is_some_and(str::is_empty))
            .collect()
    }
}

/// Reads backend settings from a `backend.tfvars` file.
///
/// # Arguments
///
/// * `fs` - File system adapter.
/// * `path` - Path to the settings file.
///
/// # Errors
///
/// Returns `TfmsError::FileAccess` if the file cannot be opened, or
/// `TfmsError::Read` if it is not valid text. Missing or unknown keys are not
/// errors; missing ones are logged as warnings.
pub fn read_backend_config(fs: &dyn FsAdapter, path: &Path) -> Result<BackendConfig> {
    let content = fs.read_to_string(path)?;
    let config = BackendConfig::parse(&content);

    for key in config.missing_keys() {
        tracing::warn!(path = %path.display(), key, "backend setting not set, passing empty value");
    }

    Ok(config)
}
