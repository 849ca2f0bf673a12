//! Error types for folder listing

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, ListError>;

/// Errors raised while listing a folder
///
/// `NotFound` and `NotADirectory` are raised before any traversal starts.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("Folder does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
