//! Feature catalog reader.
//!
//! Each environment lists its features in `features.json`, a JSON array of
//! `{"name", "dir", "stateFile"}` objects. Array order is execution order.
//!
//! Decoding is lenient: keys match field names case-insensitively, `null`
//! values leave a field untouched, unknown keys are ignored, and anything
//! after the top-level array is not read.

use crate::error::{Result, TfmsError};
use crate::tools::fs::FsAdapter;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// One independently deployable unit of infrastructure.
///
/// Absent or `null` fields decode as empty values; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    /// Display name.
    pub name: String,

    /// Terraform root module directory, relative to the invocation directory.
    pub dir: PathBuf,

    /// Backend key of the feature's state file.
    pub state_file: String,
}

impl<'de> Deserialize<'de> for Feature {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FeatureVisitor)
    }
}

struct FeatureVisitor;

impl<'de> Visitor<'de> for FeatureVisitor {
    type Value = Feature;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a feature object")
    }

    // A `null` array element is an all-empty feature.
    fn visit_unit<E: de::Error>(self) -> std::result::Result<Feature, E> {
        Ok(Feature::default())
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Feature, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut feature = Feature::default();

        while let Some(key) = map.next_key::<String>()? {
            match key.to_ascii_lowercase().as_str() {
                "name" => {
                    if let Some(name) = map.next_value::<Option<String>>()? {
                        feature.name = name;
                    }
                }
                "dir" => {
                    if let Some(dir) = map.next_value::<Option<PathBuf>>()? {
                        feature.dir = dir;
                    }
                }
                "statefile" => {
                    if let Some(state_file) = map.next_value::<Option<String>>()? {
                        feature.state_file = state_file;
                    }
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(feature)
    }
}

/// Reads the feature catalog of an environment.
///
/// # Arguments
///
/// * `fs` - File system adapter.
/// * `path` - The environment's `features.json`, as resolved by
///   `RunnerConfig::environment`.
///
/// # Returns
///
/// Features in catalog order. A `null` catalog is an empty list.
///
/// # Errors
///
/// Returns `TfmsError::FileAccess` if the catalog cannot be opened,
/// `TfmsError::Read` if it is not valid text, or `TfmsError::Decode` if it is
/// not an array of feature objects.
pub fn read_features(fs: &dyn FsAdapter, path: &Path) -> Result<Vec<Feature>> {
    let content = fs.read_to_string(path)?;

    // Only the first JSON value is decoded; trailing content is ignored.
    let mut deserializer = serde_json::Deserializer::from_str(&content);
    let features = Option::<Vec<Feature>>::deserialize(&mut deserializer)
        .map_err(|e| TfmsError::Decode {
            path: path.to_path_buf(),
            source: e,
        })?
        .unwrap_or_default();

    for feature in features.iter().filter(|f| f.state_file.is_empty()) {
        tracing::warn!(feature = %feature.name, path = %path.display(), "feature has no stateFile");
    }

    tracing::debug!(count = features.len(), path = %path.display(), "loaded feature catalog");
    Ok(features)
}
