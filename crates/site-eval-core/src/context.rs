//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::utils::text::line_at_offset;

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents.
    pub content: &'a str,
    /// Path relative to the project root, used in violations.
    pub relative_path: PathBuf,
    /// Content split on `\n`, without line terminators.
    pub lines: Vec<&'a str>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Self {
            path,
            content,
            relative_path,
            lines: content.lines().collect(),
        }
    }

    /// Creates a context for inline content, with `path` used as-is.
    #[must_use]
    pub fn from_source(path: &'a Path, content: &'a str) -> Self {
        Self {
            path,
            content,
            relative_path: path.to_path_buf(),
            lines: content.lines().collect(),
        }
    }

    /// Iterates over `(line_number, line)` pairs, 1-indexed.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(i, line)| (i + 1, *line))
    }

    /// Returns the 1-indexed line containing byte `offset` of the content.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        line_at_offset(self.content, offset)
    }
}

/// Context provided to project-wide rules.
#[derive(Debug, Clone)]
pub struct ProjectContext<'a> {
    /// Root directory of the project.
    pub root: &'a Path,
}

impl<'a> ProjectContext<'a> {
    /// Creates a new project context.
    #[must_use]
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Resolves a root-relative path.
    #[must_use]
    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }

    /// Returns `path` relative to the root when possible.
    #[must_use]
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }
}
