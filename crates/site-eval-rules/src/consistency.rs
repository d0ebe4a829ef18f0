//! Cross-reference checks between docs, content and the checker scripts.
//!
//! | Rule | Inputs |
//! |------|--------|
//! | `consistency/file-ref` | Markdown/YAML docs; every referenced path must exist |
//! | `consistency/stat-citation` | Content files; every cited stat must be in the registry |
//! | `consistency/eval-rubric` | Checker scripts; each defines and invokes its entry point |

use regex::Regex;
use site_eval_core::utils::compile;
use site_eval_core::{
    collect_files_multi, CheckReport, ConfigError, FileContext, ProjectContext, ProjectRule, Rule,
    RubricConfig, Violation,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Extensions of documentation files scanned for references.
pub const DOC_EXTENSIONS: [&str; 3] = [".md", ".yaml", ".yml"];

/// Extensions of content files scanned for stat citations.
pub const CITATION_EXTENSIONS: [&str; 2] = [".md", ".mdx"];

static RE_MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| compile(r"\[([^\]]*)\]\(([^)]+)\)"));
static RE_BACKTICK_PATH: LazyLock<Regex> =
    LazyLock::new(|| compile(r"`([^`]*/[^`]+\.[a-zA-Z]+)`"));
static RE_BARE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?:^|\s)((?:\./|src/|scripts/|content/|\.specs/|\.claude/)[^\s,)]+\.[a-zA-Z]+)")
});
static RE_REGISTRY_KEY: LazyLock<Regex> = LazyLock::new(|| compile(r"^([a-zA-Z0-9_-]+)\s*:"));
static RE_STAT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\{\{stat:([a-zA-Z0-9_-]+)\}\}"));
static RE_DATA_STAT: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"data-stat\s*=\s*["']([a-zA-Z0-9_-]+)["']"#));

/// Paths referenced from documentation must exist under the project root.
#[derive(Debug, Clone)]
pub struct FileRef {
    root: PathBuf,
}

impl FileRef {
    /// Creates the rule, resolving references against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Candidate references on one line, in pattern order.
    fn references(line: &str) -> Vec<&str> {
        let patterns: [(&Regex, usize); 3] = [
            (&RE_MARKDOWN_LINK, 2),
            (&RE_BACKTICK_PATH, 1),
            (&RE_BARE_PATH, 1),
        ];

        patterns
            .iter()
            .flat_map(|(re, group)| {
                re.captures_iter(line)
                    .filter_map(move |caps| caps.get(*group).map(|m| m.as_str()))
            })
            .filter(|r| !Self::is_ignored(r))
            .collect()
    }

    /// URLs, anchors, mail links, template placeholders and globs.
    fn is_ignored(reference: &str) -> bool {
        reference.is_empty()
            || reference.starts_with("http://")
            || reference.starts_with("https://")
            || reference.starts_with('#')
            || reference.starts_with("mailto:")
            || reference.contains("{{")
            || reference.contains('*')
    }

    fn exists(&self, reference: &str) -> bool {
        let path = reference.strip_prefix('/').unwrap_or(reference);
        let path = path.split('#').next().unwrap_or(path);
        self.root.join(path).exists()
    }
}

impl Rule for FileRef {
    fn name(&self) -> &'static str {
        "consistency/file-ref"
    }

    fn description(&self) -> &'static str {
        "Paths referenced from docs must exist"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (line_no, line) in ctx.numbered_lines() {
            for reference in Self::references(line) {
                if !self.exists(reference) {
                    violations.push(
                        Violation::new(
                            self.name(),
                            ctx.relative_path.clone(),
                            line_no,
                            format!("Referenced file does not exist: {reference}"),
                        )
                        .with_snippet(line.trim()),
                    );
                }
            }
        }
        violations
    }
}

/// Reads approved stat identifiers: every line that starts with `key:`.
#[must_use]
pub fn parse_registry(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter_map(|line| RE_REGISTRY_KEY.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Flags citations in one file whose identifier is not approved.
fn unapproved_citations(
    rule: &str,
    ctx: &FileContext,
    approved: &HashSet<String>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (line_no, line) in ctx.numbered_lines() {
        for re in [&*RE_STAT_TOKEN, &*RE_DATA_STAT] {
            for caps in re.captures_iter(line) {
                let id = &caps[1];
                if !approved.contains(id) {
                    violations.push(
                        Violation::new(
                            rule,
                            ctx.relative_path.clone(),
                            line_no,
                            format!("Stat \"{id}\" not found in approved stats.yaml"),
                        )
                        .with_snippet(line.trim()),
                    );
                }
            }
        }
    }
    violations
}

/// Content may only cite statistics from the approved registry.
///
/// A missing or empty registry skips the check with a note.
#[derive(Debug, Clone)]
pub struct StatCitation {
    registry: PathBuf,
    content_dirs: Vec<PathBuf>,
}

impl StatCitation {
    /// Creates the rule for a registry file and the content directories
    /// to scan, both relative to the project root.
    #[must_use]
    pub fn new(registry: impl Into<PathBuf>, content_dirs: Vec<PathBuf>) -> Self {
        Self {
            registry: registry.into(),
            content_dirs,
        }
    }
}

impl ProjectRule for StatCitation {
    fn name(&self) -> &'static str {
        "consistency/stat-citation"
    }

    fn description(&self) -> &'static str {
        "Cited stats must appear in the approved registry"
    }

    fn check_project(&self, ctx: &ProjectContext) -> CheckReport {
        let mut report = CheckReport::new();

        let registry_path = ctx.resolve(&self.registry);
        let Ok(registry) = std::fs::read_to_string(&registry_path) else {
            report.note(format!(
                "No {} found; skipping stat citation check",
                self.registry.display()
            ));
            return report;
        };

        let approved = parse_registry(&registry);
        if approved.is_empty() {
            report.note("No stats found in stats.yaml; skipping");
            return report;
        }
        report.note(format!(
            "Found {} approved stat(s) in stats.yaml",
            approved.len()
        ));

        for dir in &self.content_dirs {
            for path in collect_files_multi(&ctx.resolve(dir), &CITATION_EXTENSIONS) {
                debug!("Checking: {}", path.display());
                let content = match std::fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!("Skipping unreadable file {}: {}", path.display(), e);
                        continue;
                    }
                };
                let file_ctx = FileContext::new(&path, &content, ctx.root);
                report
                    .violations
                    .extend(unapproved_citations(self.name(), &file_ctx, &approved));
                report.files_checked += 1;
            }
        }

        report
    }
}

/// Checker scripts must define and invoke their entry point.
#[derive(Debug, Clone)]
pub struct EvalRubric {
    definition: Regex,
    invocation: Regex,
    exempt: Vec<String>,
}

impl EvalRubric {
    /// Creates the rule from the rubric table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if a configured pattern is invalid.
    pub fn from_config(config: &RubricConfig) -> Result<Self, ConfigError> {
        let (definition, invocation) = config.compile()?;
        Ok(Self {
            definition,
            invocation,
            exempt: config.exempt.clone(),
        })
    }

    fn is_exempt(&self, ctx: &FileContext) -> bool {
        let name = ctx.relative_path.to_string_lossy();
        self.exempt.iter().any(|e| name.ends_with(e.as_str()))
    }
}

impl Rule for EvalRubric {
    fn name(&self) -> &'static str {
        "consistency/eval-rubric"
    }

    fn description(&self) -> &'static str {
        "Checker scripts must define run() and call it at top level"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if self.is_exempt(ctx) {
            return Vec::new();
        }

        let mut violations = Vec::new();
        if !self.definition.is_match(ctx.content) {
            violations.push(Violation::new(
                self.name(),
                ctx.relative_path.clone(),
                1,
                "Eval script missing run() function",
            ));
        }
        if !self.invocation.is_match(ctx.content) {
            violations.push(Violation::new(
                self.name(),
                ctx.relative_path.clone(),
                1,
                "Eval script does not invoke run(): missing top-level call",
            ));
        }
        violations
    }
}
