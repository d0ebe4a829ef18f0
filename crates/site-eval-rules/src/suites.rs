//! Checker suites and the rule catalog.
//!
//! Every suite is built from a [`Config`] and a project root. Suites over
//! line-addressable findings produce a [`Checker`]; `perf` and
//! `frontmatter` have their own runners.

use crate::consistency::{FileRef, StatCitation, DOC_EXTENSIONS};
use crate::{a11y, brand, perf, seo, EvalRubric};
use site_eval_core::{
    resolve_root, Checker, CheckerError, Config, ConfigError, FileSet, ProjectRule, Rule,
};
use std::path::Path;
use thiserror::Error;

/// Errors building a suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The project root could not be resolved.
    #[error(transparent)]
    Checker(#[from] CheckerError),
    /// A configured value is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The quality dimensions, one per checker run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    /// Accessibility of built HTML.
    A11y,
    /// Brand fonts, colours and images.
    Brand,
    /// SEO tags in built HTML.
    Seo,
    /// Byte budgets of built output.
    Perf,
    /// Cross-references between docs, content and checker scripts.
    Consistency,
    /// Content frontmatter schemas.
    Frontmatter,
}

impl Suite {
    /// Every suite, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::A11y,
        Self::Brand,
        Self::Seo,
        Self::Perf,
        Self::Consistency,
        Self::Frontmatter,
    ];

    /// Short name, as used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::A11y => "a11y",
            Self::Brand => "brand",
            Self::Seo => "seo",
            Self::Perf => "perf",
            Self::Consistency => "consistency",
            Self::Frontmatter => "frontmatter",
        }
    }

    /// Banner title printed at the start of a run.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::A11y => "Accessibility Check",
            Self::Brand => "Brand Consistency Check",
            Self::Seo => "SEO Check",
            Self::Perf => "Performance Budget Check",
            Self::Consistency => "Consistency Check",
            Self::Frontmatter => "Frontmatter Validation",
        }
    }

    /// Heading of the final report.
    #[must_use]
    pub fn report_title(self) -> &'static str {
        match self {
            Self::A11y => "Accessibility Report",
            Self::Brand => "Brand Check Report",
            Self::Seo => "SEO Report",
            Self::Perf => "Performance Budget Report",
            Self::Consistency => "Consistency Report",
            Self::Frontmatter => "Frontmatter Validation Report",
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Suite the rule belongs to.
    pub suite: Suite,
    /// Rule identifier.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Every rule, grouped by suite.
#[must_use]
pub fn catalog() -> Vec<RuleInfo> {
    let config = Config::default();
    let mut entries = Vec::new();

    let mut push = |suite, name, description| {
        entries.push(RuleInfo {
            suite,
            name,
            description,
        });
    };

    for rule in a11y::rules() {
        push(Suite::A11y, rule.name(), rule.description());
    }
    for rule in brand::style_rules(&config.brand)
        .into_iter()
        .chain(brand::source_rules())
    {
        push(Suite::Brand, rule.name(), rule.description());
    }
    for rule in seo::rules() {
        push(Suite::Seo, rule.name(), rule.description());
    }
    for (name, description) in seo::LENGTH_RULES {
        push(Suite::Seo, name, description);
    }
    for (name, description) in perf::RULES {
        push(Suite::Perf, name, description);
    }

    let file_ref = FileRef::new(".");
    push(Suite::Consistency, file_ref.name(), file_ref.description());
    let citations = StatCitation::new(&config.paths.stats_file, Vec::new());
    push(Suite::Consistency, citations.name(), citations.description());
    if let Ok(rubric) = EvalRubric::from_config(&config.rubric) {
        push(Suite::Consistency, rubric.name(), rubric.description());
    }

    push(
        Suite::Frontmatter,
        "frontmatter/blog",
        "Blog posts must match the blog schema",
    );
    push(
        Suite::Frontmatter,
        "frontmatter/case-studies",
        "Case studies must match the case-study schema",
    );

    entries
}

/// Accessibility rules over every built HTML file.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved.
pub fn a11y_checker(root: &Path, config: &Config) -> Result<Checker, SuiteError> {
    Ok(Checker::builder()
        .name(Suite::A11y.name())
        .root(root)
        .scan(FileSet::new(&config.paths.dist, &[".html"]), a11y::rules())
        .build()?)
}

/// Brand fonts over stylesheets and built HTML, and utility, colour and
/// image rules over page sources.
///
/// Scans are registered as: built CSS and HTML, source CSS, page sources.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved.
pub fn brand_checker(root: &Path, config: &Config) -> Result<Checker, SuiteError> {
    Ok(Checker::builder()
        .name(Suite::Brand.name())
        .root(root)
        .scan(
            FileSet::new(&config.paths.dist, &[".css", ".html"]),
            brand::style_rules(&config.brand),
        )
        .scan(
            FileSet::new(&config.paths.src, &[".css"]),
            brand::style_rules(&config.brand),
        )
        .scan(
            FileSet::new(&config.paths.src, &[".astro", ".tsx", ".jsx"]),
            brand::source_rules(),
        )
        .build()?)
}

/// SEO rules over every built HTML file.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved.
pub fn seo_checker(root: &Path, config: &Config) -> Result<Checker, SuiteError> {
    Ok(Checker::builder()
        .name(Suite::Seo.name())
        .root(root)
        .scan(FileSet::new(&config.paths.dist, &[".html"]), seo::rules())
        .build()?)
}

/// File references in docs, then stat citations, then the checker-script
/// rubric.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or a rubric pattern is
/// invalid.
pub fn consistency_checker(root: &Path, config: &Config) -> Result<Checker, SuiteError> {
    let root = resolve_root(root)?;
    let mut builder = Checker::builder()
        .name(Suite::Consistency.name())
        .root(&root);

    for dir in &config.paths.docs {
        builder = builder.scan_with(FileSet::new(dir, &DOC_EXTENSIONS), FileRef::new(&root));
    }

    let rubric = EvalRubric::from_config(&config.rubric)?;
    builder = builder
        .project_rule(StatCitation::new(
            &config.paths.stats_file,
            vec![config.paths.blog.clone(), config.paths.case_studies.clone()],
        ))
        .scan_with(
            FileSet::new(&config.paths.eval, &[config.rubric.extension.as_str()]),
            rubric,
        );

    Ok(builder.build()?)
}
