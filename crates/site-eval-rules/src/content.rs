//! Frontmatter validation for content collections.
//!
//! Each collection is a directory of Markdown files checked against one
//! [`Schema`]. A file without a parseable header yields a single
//! `frontmatter` error and no field checks.

mod fields;
mod schemas;

pub use fields::{is_absolute_url, is_date};
pub use schemas::{BlogSchema, CaseStudySchema};

use serde::Serialize;
use site_eval_core::frontmatter;
use site_eval_core::{collect_files_multi, Config, Frontmatter, ValidationError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extensions of content files.
pub const CONTENT_EXTENSIONS: [&str; 3] = [".md", ".mdx", ".mdoc"];

/// Field name used when a file has no parseable header.
pub const FRONTMATTER_FIELD: &str = "frontmatter";

const MISSING_FRONTMATTER: &str = "Missing or invalid frontmatter block (no --- delimiters)";

/// One violated field constraint, before it is tied to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted/bracketed field path.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

/// Field rules for one content collection.
pub trait Schema: Send + Sync {
    /// Collection name used in reports (e.g. `blog`).
    fn collection(&self) -> &'static str;

    /// Checks a parsed header and returns every violated constraint.
    fn validate(&self, fm: &Frontmatter) -> Vec<FieldError>;
}

/// Validates one file's raw text against `schema`.
#[must_use]
pub fn validate_source(schema: &dyn Schema, file: &Path, raw: &str) -> Vec<ValidationError> {
    match frontmatter::parse(raw) {
        Ok(fm) => schema
            .validate(&fm)
            .into_iter()
            .map(|e| ValidationError::new(file, e.field, e.message))
            .collect(),
        Err(e) => {
            debug!("No frontmatter in {}: {}", file.display(), e);
            vec![ValidationError::new(
                file,
                FRONTMATTER_FIELD,
                MISSING_FRONTMATTER,
            )]
        }
    }
}

struct Collection {
    dir: PathBuf,
    schema: Box<dyn Schema>,
}

/// Files found in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    /// Collection name.
    pub name: String,
    /// Number of content files found.
    pub files: usize,
}

/// Result of a validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Per-collection file counts, in registration order.
    pub collections: Vec<CollectionSummary>,
    /// Every error found, grouped by file in scan order.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Returns true if any file had at least one error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total content files across collections.
    #[must_use]
    pub fn files_checked(&self) -> usize {
        self.collections.iter().map(|c| c.files).sum()
    }
}

/// Runs each collection's schema over its content files.
pub struct FrontmatterValidator {
    root: PathBuf,
    collections: Vec<Collection>,
}

impl FrontmatterValidator {
    /// Creates a validator with no collections.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            collections: Vec::new(),
        }
    }

    /// Creates a validator for the blog and case-study collections.
    #[must_use]
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(root)
            .collection(
                config.paths.blog.clone(),
                BlogSchema::from_config(&config.content),
            )
            .collection(
                config.paths.case_studies.clone(),
                CaseStudySchema::from_config(&config.content),
            )
    }

    /// Adds a collection rooted at `dir` (relative to the project root).
    #[must_use]
    pub fn collection<S: Schema + 'static>(mut self, dir: impl Into<PathBuf>, schema: S) -> Self {
        self.collections.push(Collection {
            dir: dir.into(),
            schema: Box::new(schema),
        });
        self
    }

    /// Validates every collection.
    #[must_use]
    pub fn run(&self) -> ValidationReport {
        info!("Starting frontmatter validation at {}", self.root.display());
        let mut report = ValidationReport::default();

        for collection in &self.collections {
            let files = collect_files_multi(&self.root.join(&collection.dir), &CONTENT_EXTENSIONS);
            debug!(
                "{}: {} content file(s)",
                collection.schema.collection(),
                files.len()
            );

            for path in &files {
                let raw = match std::fs::read_to_string(path) {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!("Skipping unreadable file {}: {}", path.display(), e);
                        continue;
                    }
                };
                let rel = path
                    .strip_prefix(&self.root)
                    .map_or_else(|_| path.clone(), Path::to_path_buf);
                report
                    .errors
                    .extend(validate_source(collection.schema.as_ref(), &rel, &raw));
            }

            report.collections.push(CollectionSummary {
                name: collection.schema.collection().to_string(),
                files: files.len(),
            });
        }

        info!(
            "frontmatter validation complete: {} error(s) in {} file(s)",
            report.errors.len(),
            report.files_checked()
        );
        report
    }
}
