//! Orchestration of one checker run.

use crate::collector::FileSet;
use crate::context::{FileContext, ProjectContext};
use crate::rule::{ProjectRule, ProjectRuleBox, Rule, RuleBox};
use crate::types::{CheckReport, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while setting up a checker.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// IO error resolving the project root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Makes `root` absolute against the current directory.
///
/// # Errors
///
/// Returns an error if `root` is relative and the current directory cannot
/// be determined.
pub fn resolve_root(root: &Path) -> Result<PathBuf, CheckerError> {
    if root.is_absolute() {
        Ok(root.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(root))
    }
}

/// A file set paired with the rules applied to every file in it.
struct Scan {
    files: FileSet,
    rules: Vec<RuleBox>,
}

/// One unit of a run. Steps execute in registration order.
enum Step {
    Scan(Scan),
    Project(ProjectRuleBox),
}

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    name: Option<String>,
    root: Option<PathBuf>,
    steps: Vec<Step>,
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the checker name used in log lines.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the project root. Relative roots resolve against the current
    /// directory.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Applies `rules` to every file in `files`.
    #[must_use]
    pub fn scan(mut self, files: FileSet, rules: Vec<RuleBox>) -> Self {
        self.steps.push(Step::Scan(Scan { files, rules }));
        self
    }

    /// Applies a single rule to every file in `files`.
    #[must_use]
    pub fn scan_with<R: Rule + 'static>(self, files: FileSet, rule: R) -> Self {
        self.scan(files, vec![Box::new(rule)])
    }

    /// Adds a project-wide rule.
    #[must_use]
    pub fn project_rule<R: ProjectRule + 'static>(self, rule: R) -> Self {
        self.project_rule_box(Box::new(rule))
    }

    /// Adds a boxed project-wide rule.
    #[must_use]
    pub fn project_rule_box(mut self, rule: ProjectRuleBox) -> Self {
        self.steps.push(Step::Project(rule));
        self
    }

    /// Builds the checker.
    ///
    /// # Errors
    ///
    /// Returns an error if a relative root cannot be resolved.
    pub fn build(self) -> Result<Checker, CheckerError> {
        let root = resolve_root(self.root.as_deref().unwrap_or_else(|| Path::new(".")))?;

        Ok(Checker {
            name: self.name.unwrap_or_else(|| "check".to_string()),
            root,
            steps: self.steps,
        })
    }
}

/// Runs a fixed set of rules over the files they apply to.
///
/// Use [`Checker::builder()`] to construct an instance.
pub struct Checker {
    name: String,
    root: PathBuf,
    steps: Vec<Step>,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the project root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Scan(scan) => scan.rules.len(),
                Step::Project(_) => 1,
            })
            .sum()
    }

    fn scans(&self) -> impl Iterator<Item = &Scan> {
        self.steps.iter().filter_map(|step| match step {
            Step::Scan(scan) => Some(scan),
            Step::Project(_) => None,
        })
    }

    /// Number of files each scan will read, in registration order.
    #[must_use]
    pub fn scan_sizes(&self) -> Vec<usize> {
        self.scans()
            .map(|s| s.files.collect(&self.root).len())
            .collect()
    }

    /// Runs every scan and project rule in registration order.
    #[must_use]
    pub fn run(&self) -> CheckReport {
        info!("Starting {} at {}", self.name, self.root.display());

        let mut report = CheckReport::new();
        let project_ctx = ProjectContext::new(&self.root);

        for step in &self.steps {
            match step {
                Step::Scan(scan) => self.run_scan(scan, &mut report),
                Step::Project(rule) => {
                    debug!("Running project rule: {}", rule.name());
                    report.extend(rule.check_project(&project_ctx));
                }
            }
        }

        info!(
            "{} complete: {} violation(s) in {} file(s)",
            self.name,
            report.violations.len(),
            report.files_checked
        );

        report
    }

    fn run_scan(&self, scan: &Scan, report: &mut CheckReport) {
        let files = scan.files.collect(&self.root);
        debug!(
            "{} file(s) under {} for {} rule(s)",
            files.len(),
            scan.files.dir.display(),
            scan.rules.len()
        );
        for path in &files {
            if let Some(violations) = self.check_file(path, &scan.rules) {
                report.violations.extend(violations);
                report.files_checked += 1;
            }
        }
    }

    /// Reads one file and applies `rules`. Unreadable files are skipped.
    fn check_file(&self, path: &Path, rules: &[RuleBox]) -> Option<Vec<Violation>> {
        debug!("Checking: {}", path.display());

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", path.display(), e);
                return None;
            }
        };

        let ctx = FileContext::new(path, &content, &self.root);
        Some(rules.iter().flat_map(|rule| rule.check(&ctx)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct FlagTodo;

    impl Rule for FlagTodo {
        fn name(&self) -> &'static str {
            "test/todo"
        }

        fn check(&self, ctx: &FileContext) -> Vec<Violation> {
            ctx.numbered_lines()
                .filter(|(_, line)| line.contains("TODO"))
                .map(|(n, line)| {
                    Violation::new(self.name(), ctx.relative_path.clone(), n, "todo")
                        .with_snippet(line)
                })
                .collect()
        }
    }

    struct NoteOnly;

    impl ProjectRule for NoteOnly {
        fn name(&self) -> &'static str {
            "test/note"
        }

        fn check_project(&self, _ctx: &ProjectContext) -> CheckReport {
            let mut report = CheckReport::new();
            report.note("nothing to check");
            report
        }
    }

    #[test]
    fn test_builder_resolves_relative_root() {
        let checker = Checker::builder().root(".").build().unwrap();
        assert!(checker.root().is_absolute());
        assert_eq!(checker.rule_count(), 0);
    }

    #[test]
    fn test_resolve_root_keeps_absolute_paths() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_root(tmp.path()).unwrap(), tmp.path());
        assert!(resolve_root(Path::new("site")).unwrap().ends_with("site"));
    }

    #[test]
    fn test_run_reports_relative_paths() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("dist/blog")).unwrap();
        fs::write(tmp.path().join("dist/index.html"), "ok\nTODO here\n").unwrap();
        fs::write(tmp.path().join("dist/blog/post.html"), "fine\n").unwrap();
        fs::write(tmp.path().join("dist/site.css"), "TODO\n").unwrap();

        let checker = Checker::builder()
            .root(tmp.path())
            .scan_with(FileSet::new("dist", &[".html"]), FlagTodo)
            .project_rule(NoteOnly)
            .build()
            .unwrap();

        assert_eq!(checker.scan_sizes(), vec![2]);

        let report = checker.run();
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].file, PathBuf::from("dist/index.html"));
        assert_eq!(report.violations[0].line, 2);
        assert_eq!(report.notes, vec!["nothing to check".to_string()]);
    }

    struct FlagAlways;

    impl ProjectRule for FlagAlways {
        fn name(&self) -> &'static str {
            "test/always"
        }

        fn check_project(&self, _ctx: &ProjectContext) -> CheckReport {
            let mut report = CheckReport::new();
            report
                .violations
                .push(Violation::new(self.name(), "project", 1, "always"));
            report
        }
    }

    #[test]
    fn test_steps_run_in_registration_order() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("docs/a.md"), "TODO\n").unwrap();
        fs::write(tmp.path().join("docs/b.md"), "TODO\n").unwrap();

        let checker = Checker::builder()
            .root(tmp.path())
            .scan_with(FileSet::new("docs", &[".md"]), FlagTodo)
            .project_rule(FlagAlways)
            .scan_with(FileSet::new("docs", &["b.md"]), FlagTodo)
            .build()
            .unwrap();

        assert_eq!(checker.rule_count(), 3);
        assert_eq!(checker.scan_sizes(), vec![2, 1]);

        let files: Vec<_> = checker
            .run()
            .violations
            .iter()
            .map(|v| v.file.display().to_string())
            .collect();
        assert_eq!(files, ["docs/a.md", "docs/b.md", "project", "docs/b.md"]);
    }

    #[test]
    fn test_missing_directory_is_empty_run() {
        let tmp = TempDir::new().unwrap();
        let report = Checker::builder()
            .root(tmp.path())
            .scan_with(FileSet::new("dist", &[".html"]), FlagTodo)
            .build()
            .unwrap()
            .run();
        assert_eq!(report.files_checked, 0);
        assert!(!report.has_violations());
    }
}
