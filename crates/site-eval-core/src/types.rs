//! Core types for check violations and reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::text::truncate_snippet;

/// A rule violation found while scanning a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// File path relative to the project root.
    pub file: PathBuf,
    /// Line number (1-indexed). Document-level findings use line 1.
    pub line: usize,
    /// Rule identifier in `<domain>/<check-name>` form (e.g. `a11y/img-alt`).
    pub rule: String,
    /// Human-readable message.
    pub message: String,
    /// Excerpt of the offending text, at most 120 characters.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub snippet: String,
}

impl Violation {
    /// Creates a new violation without a snippet.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        file: impl Into<PathBuf>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line: line.max(1),
            rule: rule.into(),
            message: message.into(),
            snippet: String::new(),
        }
    }

    /// Attaches an excerpt of the offending text, truncated to 120 characters.
    #[must_use]
    pub fn with_snippet(mut self, snippet: &str) -> Self {
        self.snippet = truncate_snippet(snippet);
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        let mut output = format!(
            "    {}:{}\n      {}\n",
            self.file.display(),
            self.line,
            self.message
        );
        if !self.snippet.is_empty() {
            output.push_str(&format!("      > {}\n", self.snippet));
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.file.display(),
            self.line,
            self.rule,
            self.message
        )
    }
}

/// A byte-budget overrun. Not line-addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfViolation {
    /// File path relative to the project root, or `(total)` for aggregates.
    pub file: PathBuf,
    /// Rule identifier (e.g. `perf/html-size`).
    pub rule: String,
    /// Human-readable message.
    pub message: String,
    /// Measured size in bytes.
    pub actual: u64,
    /// Budget in bytes.
    pub budget: u64,
}

impl PerfViolation {
    /// Creates a new budget violation.
    #[must_use]
    pub fn new(
        rule: impl Into<String>,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
        actual: u64,
        budget: u64,
    ) -> Self {
        Self {
            file: file.into(),
            rule: rule.into(),
            message: message.into(),
            actual,
            budget,
        }
    }
}

impl std::fmt::Display for PerfViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}] {}", self.file.display(), self.rule, self.message)
    }
}

/// A content-schema violation found in a frontmatter header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// File path relative to the project root.
    pub file: PathBuf,
    /// Dotted/bracketed path into the frontmatter (e.g. `hero.lead`, `tags[2]`).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(
        file: impl Into<PathBuf>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.file.display(), self.field, self.message)
    }
}

/// Result of one checker run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// All violations found, in scan order.
    pub violations: Vec<Violation>,
    /// Number of files read.
    pub files_checked: usize,
    /// Informational notes (skipped sub-checks and the like).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl CheckReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any violation was recorded.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Records an informational note.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Groups violations by rule, preserving the order in which each rule
    /// was first seen.
    #[must_use]
    pub fn by_rule(&self) -> Vec<(&str, Vec<&Violation>)> {
        let mut groups: Vec<(&str, Vec<&Violation>)> = Vec::new();
        for v in &self.violations {
            match groups.iter_mut().find(|(rule, _)| *rule == v.rule) {
                Some((_, group)) => group.push(v),
                None => groups.push((v.rule.as_str(), vec![v])),
            }
        }
        groups
    }

    /// Counts violations for a single rule.
    #[must_use]
    pub fn count_rule(&self, rule: &str) -> usize {
        self.violations.iter().filter(|v| v.rule == rule).count()
    }

    /// Adds violations, notes and file counts from another report.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.notes.extend(other.notes);
        self.files_checked += other.files_checked;
    }
}

/// Process exit status for a finished run: 0 when clean, 1 otherwise.
#[must_use]
pub fn exit_code(has_failures: bool) -> i32 {
    i32::from(has_failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(rule: &str, line: usize) -> Violation {
        Violation::new(rule, "dist/index.html", line, "Image missing alt attribute")
    }

    #[test]
    fn violation_line_is_at_least_one() {
        let v = make_violation("a11y/img-alt", 0);
        assert_eq!(v.line, 1);
    }

    #[test]
    fn violation_snippet_is_truncated() {
        let long = "x".repeat(300);
        let v = make_violation("a11y/img-alt", 3).with_snippet(&long);
        assert_eq!(v.snippet.chars().count(), 120);
    }

    #[test]
    fn violation_display() {
        let v = make_violation("a11y/img-alt", 5);
        insta::assert_snapshot!(v.to_string(), @"dist/index.html:5: [a11y/img-alt] Image missing alt attribute");
    }

    #[test]
    fn violation_format_omits_empty_snippet() {
        let v = make_violation("a11y/landmark-main", 1);
        assert!(!v.format().contains('>'));

        let v = make_violation("a11y/img-alt", 1).with_snippet("<img src=\"a.png\">");
        assert_eq!(
            v.format(),
            "    dist/index.html:1\n      Image missing alt attribute\n      > <img src=\"a.png\">\n"
        );
    }

    #[test]
    fn by_rule_keeps_first_seen_order() {
        let mut report = CheckReport::new();
        report.violations.push(make_violation("a11y/img-alt", 1));
        report.violations.push(make_violation("a11y/heading-order", 2));
        report.violations.push(make_violation("a11y/img-alt", 3));

        let groups = report.by_rule();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "a11y/img-alt");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "a11y/heading-order");
    }

    #[test]
    fn extend_merges_counts_and_notes() {
        let mut a = CheckReport::new();
        a.files_checked = 2;
        let mut b = CheckReport::new();
        b.files_checked = 3;
        b.note("skipped");
        b.violations.push(make_violation("seo/title", 1));

        a.extend(b);
        assert_eq!(a.files_checked, 5);
        assert_eq!(a.notes, vec!["skipped".to_string()]);
        assert!(a.has_violations());
    }

    #[test]
    fn exit_code_reflects_failures() {
        assert_eq!(exit_code(false), 0);
        assert_eq!(exit_code(true), 1);
    }
}
