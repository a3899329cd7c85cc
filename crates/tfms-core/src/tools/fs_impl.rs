//! Standard file system adapter implementation.
//!
//! This module provides a concrete implementation of the `FsAdapter` trait
//! using `std::fs`.

use crate::error::{Result, TfmsError};
use crate::tools::fs::FsAdapter;
use std::path::Path;

/// Standard file system adapter using `std::fs`.
///
/// This is the default implementation used in production. For testing, use
/// `MockFsAdapter` instead.
#[derive(Debug, Default)]
pub struct StdFsAdapter;

impl StdFsAdapter {
    /// Creates a new standard file system adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FsAdapter for StdFsAdapter {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                TfmsError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            } else {
                TfmsError::FileAccess {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
