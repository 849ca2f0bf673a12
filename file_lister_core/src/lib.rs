//! File Lister Core Library
//!
//! Recursive enumeration of every file below a folder, with an optional
//! case-insensitive `.txt` exclusion rule.

pub mod error;
pub mod filter;
pub mod lister;

pub use error::{ListError, Result};
pub use filter::SuffixFilter;
pub use lister::{EXCLUDE_TEXT_FILES, FileLister, ListOptions, list_files, list_files_with};
