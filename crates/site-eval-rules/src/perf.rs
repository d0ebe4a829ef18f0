//! Byte-budget checks over built output.
//!
//! Budgets are measured on file sizes from the filesystem and on inline
//! `<script>`/`<style>` bodies in HTML. Every comparison is strict: a size
//! equal to its budget passes.

use regex::Regex;
use serde::Serialize;
use site_eval_core::utils::{compile, format_bytes};
use site_eval_core::{
    collect_files, collect_files_multi, collect_html_files, Budgets, Config, PerfViolation,
};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Image extensions counted towards the image budget.
pub const IMAGE_EXTENSIONS: [&str; 7] = [
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".avif", ".svg",
];

/// File name used for aggregate violations.
pub const TOTAL_FILE: &str = "(total)";

/// Rule identifiers and descriptions, in report order.
pub const RULES: [(&str, &str); 9] = [
    ("perf/html-size", "HTML files must stay within 100KB each"),
    ("perf/css-size", "CSS files must stay within 50KB each"),
    ("perf/css-total", "All CSS together must stay within 150KB"),
    ("perf/js-size", "JS files must stay within 100KB each"),
    ("perf/js-total", "All JS together must stay within 300KB"),
    ("perf/image-size", "Images must stay within 500KB each"),
    ("perf/inline-script", "Inline <script> bodies must stay within 10KB"),
    ("perf/inline-style", "Inline <style> bodies must stay within 10KB"),
    (
        "perf/total-weight",
        "HTML, CSS, JS and images together must stay within 1MB",
    ),
];

static RE_INLINE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?is)<script([^>]*)>(.*?)</script>"));
static RE_INLINE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?is)<style[^>]*>(.*?)</style>"));

/// Size total for one asset category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Number of files found.
    pub files: usize,
    /// Sum of the sizes that could be read.
    pub bytes: u64,
}

/// Result of a performance run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerfReport {
    /// Budget overruns, in check order.
    pub violations: Vec<PerfViolation>,
    /// HTML total.
    pub html: CategoryTotal,
    /// CSS total.
    pub css: CategoryTotal,
    /// JS total.
    pub js: CategoryTotal,
    /// Image total.
    pub images: CategoryTotal,
}

impl PerfReport {
    /// Returns true if any budget was exceeded.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// HTML + CSS + JS + images.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.html.bytes + self.css.bytes + self.js.bytes + self.images.bytes
    }

    /// Category lines for the summary, as `(label, total)`.
    #[must_use]
    pub fn categories(&self) -> [(&'static str, CategoryTotal); 4] {
        [
            ("HTML", self.html),
            ("CSS", self.css),
            ("JS", self.js),
            ("Images", self.images),
        ]
    }
}

/// Files found in the build output, per category.
#[derive(Debug, Clone, Default)]
pub struct AssetFiles {
    /// `.html` files.
    pub html: Vec<PathBuf>,
    /// `.css` files.
    pub css: Vec<PathBuf>,
    /// `.js` files.
    pub js: Vec<PathBuf>,
    /// Files with an [`IMAGE_EXTENSIONS`] extension.
    pub images: Vec<PathBuf>,
}

/// Checks built output against [`Budgets`].
#[derive(Debug, Clone)]
pub struct PerfChecker {
    root: PathBuf,
    dist: PathBuf,
    budgets: Budgets,
}

impl PerfChecker {
    /// Creates a checker for `dist` (relative to `root`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, dist: impl Into<PathBuf>, budgets: Budgets) -> Self {
        Self {
            root: root.into(),
            dist: dist.into(),
            budgets,
        }
    }

    /// Creates a checker from the `[paths]` and `[budgets]` tables.
    #[must_use]
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root, config.paths.dist.clone(), config.budgets)
    }

    fn dist_dir(&self) -> PathBuf {
        self.root.join(&self.dist)
    }

    /// HTML files in the build output.
    #[must_use]
    pub fn html_files(&self) -> Vec<PathBuf> {
        collect_html_files(&self.dist_dir())
    }

    /// Collects every measured file in the build output.
    #[must_use]
    pub fn assets(&self) -> AssetFiles {
        let dist = self.dist_dir();
        AssetFiles {
            html: self.html_files(),
            css: collect_files(&dist, ".css"),
            js: collect_files(&dist, ".js"),
            images: collect_files_multi(&dist, &IMAGE_EXTENSIONS),
        }
    }

    /// Runs every budget check.
    #[must_use]
    pub fn run(&self) -> PerfReport {
        self.run_assets(&self.assets())
    }

    /// Runs every budget check over already collected files.
    #[must_use]
    pub fn run_assets(&self, assets: &AssetFiles) -> PerfReport {
        info!("Starting perf at {}", self.dist_dir().display());

        let mut report = PerfReport::default();
        let b = &self.budgets;
        let v = &mut report.violations;

        report.html = self.file_sizes(&assets.html, b.html_file, "perf/html-size", "HTML", v);

        report.css = self.file_sizes(&assets.css, b.css_file, "perf/css-size", "CSS", v);
        v.extend(total_size(report.css.bytes, b.css_total, "perf/css-total", "CSS"));

        report.js = self.file_sizes(&assets.js, b.js_file, "perf/js-size", "JS", v);
        v.extend(total_size(report.js.bytes, b.js_total, "perf/js-total", "JS"));

        report.images =
            self.file_sizes(&assets.images, b.image_file, "perf/image-size", "Image", v);

        for path in &assets.html {
            self.inline_resources(path, &mut report.violations);
        }

        report.violations.extend(total_size(
            report.total_weight(),
            b.total_weight,
            "perf/total-weight",
            "page",
        ));

        info!(
            "perf complete: {} violation(s), {} total",
            report.violations.len(),
            format_bytes(report.total_weight())
        );

        report
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
    }

    /// Sums file sizes and flags files over `budget`. Files that cannot be
    /// stat'ed are left out of the total.
    fn file_sizes(
        &self,
        files: &[PathBuf],
        budget: u64,
        rule: &str,
        label: &str,
        violations: &mut Vec<PerfViolation>,
    ) -> CategoryTotal {
        let mut total = CategoryTotal {
            files: files.len(),
            bytes: 0,
        };

        for path in files {
            let size = match std::fs::metadata(path) {
                Ok(meta) => meta.len(),
                Err(e) => {
                    debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            total.bytes += size;

            if size > budget {
                violations.push(PerfViolation::new(
                    rule,
                    self.relative(path),
                    format!(
                        "{label} file exceeds budget: {} > {}",
                        format_bytes(size),
                        format_bytes(budget)
                    ),
                    size,
                    budget,
                ));
            }
        }

        total
    }

    fn inline_resources(&self, path: &Path, violations: &mut Vec<PerfViolation>) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable file {}: {}", path.display(), e);
                return;
            }
        };
        let rel = self.relative(path);

        for (rule, label, size, budget) in inline_sizes(&content, &self.budgets) {
            violations.push(PerfViolation::new(
                rule,
                rel.clone(),
                format!(
                    "Inline {label} exceeds budget: {} > {}",
                    format_bytes(size),
                    format_bytes(budget)
                ),
                size,
                budget,
            ));
        }
    }
}

/// Inline bodies over budget as `(rule, label, size, budget)`. Scripts
/// with a `src` attribute are external and not measured.
fn inline_sizes(
    content: &str,
    budgets: &Budgets,
) -> Vec<(&'static str, &'static str, u64, u64)> {
    let mut over = Vec::new();

    for caps in RE_INLINE_SCRIPT.captures_iter(content) {
        if caps[1].contains("src") {
            continue;
        }
        let size = caps[2].len() as u64;
        if size > budgets.inline_script {
            over.push(("perf/inline-script", "script", size, budgets.inline_script));
        }
    }

    for caps in RE_INLINE_STYLE.captures_iter(content) {
        let size = caps[1].len() as u64;
        if size > budgets.inline_style {
            over.push(("perf/inline-style", "style", size, budgets.inline_style));
        }
    }

    over
}

fn total_size(total: u64, budget: u64, rule: &str, label: &str) -> Option<PerfViolation> {
    (total > budget).then(|| {
        PerfViolation::new(
            rule,
            TOTAL_FILE,
            format!(
                "Total {label} size exceeds budget: {} > {}",
                format_bytes(total),
                format_bytes(budget)
            ),
            total,
            budget,
        )
    })
}
