//! Recursive folder listing
//!
//! Streams every non-directory entry below a folder using walkdir, applying
//! the optional `.txt` exclusion to file names. Unreadable subtrees are
//! logged and skipped so one bad directory never aborts the listing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{ListError, Result};
use crate::filter::SuffixFilter;

/// Default for the `.txt` exclusion rule when the caller does not choose one
pub const EXCLUDE_TEXT_FILES: bool = false;

/// Options for listing a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Omit files whose name ends with `.txt` (any case)
    pub exclude_txt: bool,
    /// Follow symbolic links while descending
    pub follow_links: bool,
    /// Maximum depth below the folder (None = unlimited), never read from config
    #[serde(skip)]
    pub max_depth: Option<usize>,
    /// Visit directory entries in file name order instead of platform order
    pub sorted: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            exclude_txt: EXCLUDE_TEXT_FILES,
            follow_links: false,
            max_depth: None,
            sorted: false,
        }
    }
}

impl ListOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether `.txt` files are omitted
    pub fn with_exclude_txt(mut self, exclude_txt: bool) -> Self {
        self.exclude_txt = exclude_txt;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum depth for the walk
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set whether entries are sorted by file name
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    fn filter(&self) -> Result<SuffixFilter> {
        if self.exclude_txt {
            SuffixFilter::text_files()
        } else {
            Ok(SuffixFilter::none())
        }
    }
}

/// Streaming iterator over the files below a folder
pub struct FileLister {
    walker: walkdir::IntoIter,
    filter: SuffixFilter,
    skipped: usize,
}

impl FileLister {
    /// Validate `folder` and prepare the walk
    ///
    /// Fails with [`ListError::NotFound`], [`ListError::NotADirectory`] or
    /// [`ListError::Io`] (folder unreachable) before touching any directory
    /// contents.
    pub fn new(folder: &Path, options: &ListOptions) -> Result<Self> {
        let metadata = fs::metadata(folder).map_err(|e| folder_error(folder, e))?;
        if !metadata.is_dir() {
            return Err(ListError::NotADirectory(folder.to_path_buf()));
        }

        let filter = options.filter()?;

        let mut walker = WalkDir::new(folder).follow_links(options.follow_links);
        if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }
        if options.sorted {
            walker = walker.sort_by_file_name();
        }

        log::debug!(
            "Listing {} with {options:?}, excluding {:?}",
            folder.display(),
            filter.patterns()
        );

        Ok(Self {
            walker: walker.into_iter(),
            filter,
            skipped: 0,
        })
    }

    /// Number of entries skipped so far because they could not be read
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn should_include_entry(&self, entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return false;
        }

        // Unfollowed links to directories count as directories
        if file_type.is_symlink() && entry.path().is_dir() {
            return false;
        }

        !self.filter.is_excluded(entry.path())
    }
}

impl Iterator for FileLister {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if self.should_include_entry(&entry) {
                        return Some(entry.into_path());
                    }
                }
                Err(e) => {
                    if let Some(path) = broken_link_path(&e) {
                        if !self.filter.is_excluded(&path) {
                            return Some(path);
                        }
                        continue;
                    }

                    self.skipped += 1;
                    log::warn!("Walk error: {e}");
                }
            }
        }
    }
}

/// Map a failed `stat` of the folder argument
///
/// Only a missing path (or a missing parent directory) means "not found";
/// anything else, such as a permission error, is surfaced as I/O.
fn folder_error(folder: &Path, error: io::Error) -> ListError {
    match error.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
            ListError::NotFound(folder.to_path_buf())
        }
        _ => ListError::Io(error),
    }
}

/// Dangling links reported while following links are still non-directory entries
fn broken_link_path(error: &walkdir::Error) -> Option<PathBuf> {
    let path = error.path()?;
    let target_missing = error
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    let is_link = fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink());

    (target_missing && is_link).then(|| path.to_path_buf())
}

/// List every file below `folder`, optionally omitting `.txt` files
pub fn list_files(folder: &Path, exclude_txt: bool) -> Result<Vec<PathBuf>> {
    list_files_with(folder, &ListOptions::new().with_exclude_txt(exclude_txt))
}

/// List every file below `folder` using explicit options
pub fn list_files_with(folder: &Path, options: &ListOptions) -> Result<Vec<PathBuf>> {
    let mut lister = FileLister::new(folder, options)?;
    let files: Vec<PathBuf> = lister.by_ref().collect();

    log::debug!(
        "Found {} file(s) under {} ({} skipped)",
        files.len(),
        folder.display(),
        lister.skipped()
    );

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("a.txt"), b"test").unwrap();
        fs::write(base.join("b.log"), b"test").unwrap();

        let subdir = base.join("sub");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("c.txt"), b"test").unwrap();

        dir
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_default_options_keep_text_files() {
        let options = ListOptions::default();
        assert_eq!(options.exclude_txt, EXCLUDE_TEXT_FILES);
        assert!(!options.follow_links);
        assert_eq!(options.max_depth, None);
        assert!(!options.sorted);
    }

    #[test]
    fn test_list_includes_nested_files() {
        let dir = create_test_directory();
        let files = list_files(dir.path(), false).unwrap();

        assert_eq!(names(&files), vec!["a.txt", "b.log", "c.txt"]);
        assert!(files.contains(&dir.path().join("sub").join("c.txt")));
        assert!(files.iter().all(|f| f.starts_with(dir.path())));
    }

    #[test]
    fn test_list_excludes_text_files() {
        let dir = create_test_directory();
        let files = list_files(dir.path(), true).unwrap();

        assert_eq!(files, vec![dir.path().join("b.log")]);
    }

    #[test]
    fn test_directories_are_never_listed() {
        let dir = create_test_directory();
        fs::create_dir_all(dir.path().join("empty/nested")).unwrap();

        let files = list_files(dir.path(), false).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| !f.is_dir()));
    }

    #[test]
    fn test_missing_folder_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = list_files(&missing, false).unwrap_err();
        assert!(matches!(err, ListError::NotFound(ref p) if *p == missing));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = create_test_directory();
        let file = dir.path().join("b.log");

        let err = list_files(&file, false).unwrap_err();
        assert!(matches!(err, ListError::NotADirectory(ref p) if *p == file));
    }

    #[test]
    fn test_missing_parent_component_is_not_found() {
        let dir = create_test_directory();
        let below_file = dir.path().join("b.log").join("inner");

        let err = list_files(&below_file, false).unwrap_err();
        assert!(matches!(err, ListError::NotFound(ref p) if *p == below_file));
    }

    #[test]
    fn test_stat_failures_other_than_missing_are_io_errors() {
        let folder = Path::new("locked/inner");

        let denied = folder_error(folder, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(
            matches!(denied, ListError::Io(ref e) if e.kind() == io::ErrorKind::PermissionDenied)
        );

        let missing = folder_error(folder, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, ListError::NotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreachable_folder_is_not_reported_missing() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(locked.join("inner")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root
        let enforced = fs::metadata(locked.join("inner")).is_err();
        let result = list_files(&locked.join("inner"), false);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if enforced {
            assert!(matches!(result, Err(ListError::Io(_))), "got {result:?}");
        }
    }

    #[test]
    fn test_max_depth_limits_descent() {
        let dir = create_test_directory();
        let options = ListOptions::new().with_max_depth(Some(1));

        let files = list_files_with(dir.path(), &options).unwrap();
        assert_eq!(names(&files), vec!["a.txt", "b.log"]);
    }

    #[test]
    fn test_sorted_walk_is_in_name_order() {
        let dir = TempDir::new().unwrap();
        for name in ["zeta.bin", "alpha.bin", "mid.bin"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let options = ListOptions::new().with_sorted(true);
        let files = list_files_with(dir.path(), &options).unwrap();

        assert_eq!(
            files,
            vec![
                dir.path().join("alpha.bin"),
                dir.path().join("mid.bin"),
                dir.path().join("zeta.bin"),
            ]
        );
    }

    #[test]
    fn test_lister_streams_lazily() {
        let dir = create_test_directory();
        let mut lister = FileLister::new(dir.path(), &ListOptions::new()).unwrap();

        assert!(lister.next().is_some());
        assert_eq!(lister.skipped(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_to_directories_are_not_followed() {
        let dir = create_test_directory();
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("link")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("b.log"), dir.path().join("file_link"))
            .unwrap();

        let files = list_files(dir.path(), false).unwrap();

        assert_eq!(names(&files), vec!["a.txt", "b.log", "c.txt", "file_link"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_skipped_and_walk_continues() {
        let dir = create_test_directory();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("loop")).unwrap();

        let options = ListOptions::new().with_follow_links(true);
        let mut lister = FileLister::new(dir.path(), &options).unwrap();
        let files: Vec<PathBuf> = lister.by_ref().collect();

        assert!(lister.skipped() > 0);
        assert_eq!(names(&files), vec!["a.txt", "b.log", "c.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_links_are_listed_in_both_modes() {
        let dir = create_test_directory();
        let dangling = dir.path().join("dangling");
        std::os::unix::fs::symlink(dir.path().join("gone"), &dangling).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("gone.TXT")).unwrap();

        for follow in [false, true] {
            let options = ListOptions::new()
                .with_follow_links(follow)
                .with_exclude_txt(true);
            let mut lister = FileLister::new(dir.path(), &options).unwrap();
            let files: Vec<PathBuf> = lister.by_ref().collect();

            assert!(files.contains(&dangling), "follow_links = {follow}");
            assert!(!files.contains(&dir.path().join("gone.TXT")));
            assert_eq!(lister.skipped(), 0);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_follow_links_descends_into_linked_directories() {
        let dir = create_test_directory();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("linked.log"), b"x").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        let options = ListOptions::new().with_follow_links(true);
        let files = list_files_with(dir.path(), &options).unwrap();

        assert!(files.contains(&dir.path().join("link").join("linked.log")));
    }
}
