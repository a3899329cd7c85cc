//! File system adapter trait and operations.
//!
//! This module defines the `FsAdapter` trait for the few file system
//! operations a run needs, allowing for both real file system access and mock
//! implementations for testing.

use crate::error::Result;
use std::path::Path;

/// File system adapter trait.
///
/// Implementations can be real (using `std::fs`) or mocked for testing.
pub trait FsAdapter: Send + Sync {
    /// Reads the contents of a file as a string.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file to read.
    ///
    /// # Returns
    ///
    /// The file contents as a `String`, or an error if the operation fails.
    ///
    /// # Errors
    ///
    /// Returns `TfmsError::FileAccess` if the file cannot be opened, or
    /// `TfmsError::Read` if its content is not valid UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Checks if a path exists.
    ///
    /// # Returns
    ///
    /// `true` if the path exists (file or directory), `false` otherwise.
    fn exists(&self, path: &Path) -> bool;

    /// Checks if a path is a directory.
    ///
    /// # Returns
    ///
    /// `true` if the path exists and is a directory, `false` otherwise.
    fn is_dir(&self, path: &Path) -> bool;
}
