//! Mock file system adapter for testing.
//!
//! This module provides a mock implementation of the `FsAdapter` trait
//! backed by in-memory collections.

use crate::error::{Result, TfmsError};
use crate::tools::fs::FsAdapter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock file system adapter for testing.
///
/// Files and directories are registered up front; nothing is ever written.
///
/// # Examples
///
/// ```
/// use tfms_core::tools::fs::FsAdapter;
/// use tfms_core::tools::fs_mock::MockFsAdapter;
/// use std::path::Path;
///
/// let fs = MockFsAdapter::new();
/// fs.add_file("infra/environments/dev/backend.tfvars", "bucket = \"b\"");
/// fs.add_dir("infra/features/network");
///
/// assert!(fs.is_dir(Path::new("infra/features/network")));
/// assert_eq!(
///     fs.read_to_string(Path::new("infra/environments/dev/backend.tfvars")).unwrap(),
///     "bucket = \"b\""
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFsAdapter {
    /// In-memory file storage (path -> content)
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    /// In-memory directory storage
    dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFsAdapter {
    /// Creates an empty mock file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file with the given content, replacing any previous content.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
    }

    /// Registers a directory.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut dirs = self.dirs.lock().unwrap();
        if !dirs.contains(&path) {
            dirs.push(path);
        }
    }
}

impl FsAdapter for MockFsAdapter {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| TfmsError::FileAccess {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().iter().any(|d| d == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_read() {
        let fs = MockFsAdapter::new();
        fs.add_file("/env/features.json", "[]");

        assert_eq!(
            fs.read_to_string(Path::new("/env/features.json")).unwrap(),
            "[]"
        );
        assert!(fs.exists(Path::new("/env/features.json")));
        assert!(!fs.is_dir(Path::new("/env/features.json")));
    }

    #[test]
    fn test_mock_fs_file_not_found() {
        let fs = MockFsAdapter::new();
        let result = fs.read_to_string(Path::new("/nonexistent.json"));

        assert!(matches!(result, Err(TfmsError::FileAccess { .. })));
    }

    #[test]
    fn test_mock_fs_dirs() {
        let fs = MockFsAdapter::new();
        fs.add_dir("./network");
        fs.add_dir("./network");

        assert!(fs.is_dir(Path::new("./network")));
        assert!(fs.exists(Path::new("./network")));
        assert!(!fs.is_dir(Path::new("./dns")));
    }
}
