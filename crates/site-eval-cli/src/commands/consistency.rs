//! Consistency command implementation.

use anyhow::{Context, Result};
use site_eval_core::Config;
use site_eval_rules::{consistency_checker, Suite};
use std::path::Path;

use super::output::Reporter;

/// Runs the consistency checker. Returns true if any violation was found.
pub fn run(root: &Path, config: &Config, out: &Reporter) -> Result<bool> {
    out.banner(Suite::Consistency);

    let checker = consistency_checker(root, config).context("Failed to build checker")?;

    let docs: Vec<String> = config
        .paths
        .docs
        .iter()
        .map(|d| format!("{}/", d.display()))
        .collect();
    out.progress(&format!(
        "\nChecking file references in {}...",
        docs.join(" and ")
    ));
    out.progress("Checking stat citations...");
    out.progress("Checking eval rubric integrity...");

    let report = checker.run();
    out.check(Suite::Consistency, &report)?;

    Ok(report.has_violations())
}
