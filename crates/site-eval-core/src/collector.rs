//! Recursive file discovery.
//!
//! Collection never fails: a missing or unreadable root yields an empty
//! list, and unreadable entries below it are skipped.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Directory name that is never descended into.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Collects every file under `dir` whose name ends with `ext`.
///
/// Paths are returned in traversal order (entries sorted by file name
/// within each directory), prefixed with `dir`. Pass an absolute `dir` to
/// get absolute paths. Symlinked directories are not descended into;
/// symlinks whose name matches are returned like files.
#[must_use]
pub fn collect_files(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == DEPENDENCY_DIR));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        if entry.file_name().to_string_lossy().ends_with(ext) {
            files.push(entry.into_path());
        }
    }

    files
}

/// Collects files for several extensions, concatenated in the order given.
#[must_use]
pub fn collect_files_multi(dir: &Path, exts: &[&str]) -> Vec<PathBuf> {
    exts.iter().flat_map(|ext| collect_files(dir, ext)).collect()
}

/// Collects all HTML files under `dir`.
#[must_use]
pub fn collect_html_files(dir: &Path) -> Vec<PathBuf> {
    collect_files(dir, ".html")
}

/// A directory plus the file extensions to gather from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    /// Directory, relative to the project root (or absolute).
    pub dir: PathBuf,
    /// Extensions including the leading dot (e.g. `.html`).
    pub extensions: Vec<String>,
}

impl FileSet {
    /// Creates a file set for `dir` and `extensions`.
    #[must_use]
    pub fn new<S: AsRef<str>>(dir: impl Into<PathBuf>, extensions: &[S]) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
        }
    }

    /// Resolves the set against `root` and collects matching files.
    #[must_use]
    pub fn collect(&self, root: &Path) -> Vec<PathBuf> {
        let dir = root.join(&self.dir);
        self.extensions
            .iter()
            .flat_map(|ext| collect_files(&dir, ext))
            .collect()
    }
}
