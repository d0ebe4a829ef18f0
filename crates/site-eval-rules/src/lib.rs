//! # site-eval-rules
//!
//! Built-in rules for the site quality gates.
//!
//! ## Suites
//!
//! | Suite | Inputs | Rules |
//! |-------|--------|-------|
//! | `a11y` | built HTML | `img-alt`, `landmark-main`, `empty-link`, `empty-button`, `html-lang`, `heading-order`, `form-label` |
//! | `brand` | built CSS/HTML, source CSS, page sources | `font`, `font-utility`, `arbitrary-color`, `raw-img` |
//! | `seo` | built HTML | `title`, `title-length`, `meta-description`, `meta-description-length`, `canonical`, `open-graph`, `structured-data`, `broken-link` |
//! | `perf` | built output sizes | `html-size`, `css-size`, `css-total`, `js-size`, `js-total`, `image-size`, `inline-script`, `inline-style`, `total-weight` |
//! | `consistency` | docs, content, checker scripts | `file-ref`, `stat-citation`, `eval-rubric` |
//! | `frontmatter` | content collections | blog and case-study schemas |
//!
//! ## Usage
//!
//! ```ignore
//! use site_eval_core::Config;
//! use site_eval_rules::a11y_checker;
//!
//! let report = a11y_checker(Path::new("."), &Config::default())?.run();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod a11y;
pub mod brand;
pub mod consistency;
pub mod content;
pub mod perf;
pub mod seo;
mod suites;

pub use consistency::{EvalRubric, FileRef, StatCitation};
pub use content::{
    BlogSchema, CaseStudySchema, CollectionSummary, FrontmatterValidator, Schema,
    ValidationReport,
};
pub use perf::{AssetFiles, PerfChecker, PerfReport};
pub use suites::{
    a11y_checker, brand_checker, catalog, consistency_checker, seo_checker, RuleInfo, Suite,
    SuiteError,
};

/// Re-export core types for convenience.
pub use site_eval_core::{CheckReport, Config, Rule, Violation};
