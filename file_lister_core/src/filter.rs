//! File name exclusion using case-insensitive glob patterns
//!
//! Only the final path component is matched, so directory names never
//! influence whether a file is excluded.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

use crate::error::{ListError, Result};

/// Extension excluded by the text-file rule
pub const TEXT_EXTENSION: &str = "txt";

/// Convert extensions to file name glob patterns
pub fn extensions_to_patterns(extensions: &[&str]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| format!("*.{}", ext.trim_start_matches('.')))
        .collect()
}

/// Suffix filter matching file names against a compiled glob set
#[derive(Debug, Clone)]
pub struct SuffixFilter {
    globset: GlobSet,
    patterns: Vec<String>,
}

impl SuffixFilter {
    /// Build a filter excluding every file whose name ends with one of `extensions`
    pub fn new(extensions: &[&str]) -> Result<Self> {
        let patterns = extensions_to_patterns(extensions);
        let mut builder = GlobSetBuilder::new();

        for pattern in &patterns {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(true)
                .build()
                .map_err(|e| ListError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| ListError::InvalidPattern(e.to_string()))?;

        Ok(Self { globset, patterns })
    }

    /// Filter that excludes nothing
    pub fn none() -> Self {
        Self {
            globset: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Filter for the `.txt` rule
    pub fn text_files() -> Result<Self> {
        Self::new(&[TEXT_EXTENSION])
    }

    /// Check whether the file at `path` is excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self.globset.is_match(Path::new(name)),
            None => false,
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
