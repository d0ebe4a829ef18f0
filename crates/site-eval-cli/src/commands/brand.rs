//! Brand command implementation.

use anyhow::{Context, Result};
use site_eval_core::Config;
use site_eval_rules::{brand_checker, Suite};
use std::path::Path;

use super::output::Reporter;

/// Runs the brand checker. Returns true if any violation was found.
pub fn run(root: &Path, config: &Config, out: &Reporter) -> Result<bool> {
    out.banner(Suite::Brand);

    let checker = brand_checker(root, config).context("Failed to build checker")?;

    // Scans: built CSS/HTML, source CSS, page sources.
    let sizes = checker.scan_sizes();
    let styles: usize = sizes.iter().take(2).sum();
    let sources = sizes.get(2).copied().unwrap_or_default();

    out.progress(&format!("\nChecking fonts in {styles} style file(s)..."));
    out.progress(&format!(
        "Checking arbitrary colors in {sources} source file(s)..."
    ));
    out.progress(&format!(
        "Checking raw <img> tags in {sources} source file(s)..."
    ));

    let report = checker.run();
    out.check(Suite::Brand, &report)?;

    Ok(report.has_violations())
}
