//! # site-eval-core
//!
//! Core framework for the site quality-gate checkers.
//!
//! This crate provides the leaf utilities every checker shares:
//!
//! - [`collect_files`] for gathering input files from a directory tree
//! - [`frontmatter`] for parsing content-file headers
//! - [`Rule`] and [`ProjectRule`] traits for per-file and project-wide checks
//! - [`Checker`] for running a set of rules over their file sets
//! - [`Violation`], [`PerfViolation`] and [`ValidationError`] for findings
//! - [`Config`] for the fixed rule tables
//!
//! ## Example
//!
//! ```ignore
//! use site_eval_core::{Checker, FileSet};
//!
//! let checker = Checker::builder()
//!     .root(".")
//!     .scan(FileSet::new("dist", &[".html"]), rules)
//!     .build()?;
//!
//! let report = checker.run();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod collector;
mod config;
mod context;
mod rule;
mod types;

/// Frontmatter header parser.
pub mod frontmatter;

/// Utility modules for rule implementations.
pub mod utils;

pub use checker::{resolve_root, Checker, CheckerBuilder, CheckerError};
pub use collector::{
    collect_files, collect_files_multi, collect_html_files, FileSet, DEPENDENCY_DIR,
};
pub use config::{
    BrandConfig, Budgets, Config, ConfigError, ContentConfig, PathsConfig, RubricConfig, KIB,
};
pub use context::{FileContext, ProjectContext};
pub use frontmatter::{Frontmatter, FrontmatterError, Value};
pub use rule::{ProjectRule, ProjectRuleBox, Rule, RuleBox};
pub use types::{exit_code, CheckReport, PerfViolation, ValidationError, Violation};
