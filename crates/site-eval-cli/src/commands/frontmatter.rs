//! Frontmatter command implementation.

use anyhow::Result;
use site_eval_core::Config;
use site_eval_rules::{FrontmatterValidator, Suite};
use std::path::Path;

use super::output::Reporter;

/// Validates every content collection. Returns true if any file failed.
pub fn run(root: &Path, config: &Config, out: &Reporter) -> Result<bool> {
    out.banner(Suite::Frontmatter);

    let report = FrontmatterValidator::from_config(root, config).run();
    out.validation(&report)?;

    Ok(report.has_errors())
}
