//! Perf command implementation.

use anyhow::Result;
use site_eval_core::Config;
use site_eval_rules::{PerfChecker, PerfReport, Suite};
use std::path::Path;

use super::output::Reporter;

/// Runs the budget checks. Returns true if any budget was exceeded.
pub fn run(root: &Path, config: &Config, out: &Reporter) -> Result<bool> {
    out.banner(Suite::Perf);

    let checker = PerfChecker::from_config(root, config);
    let assets = checker.assets();
    if assets.html.is_empty() {
        out.no_input::<PerfReport>(&super::no_html_hint(config))?;
        return Ok(false);
    }

    out.progress(&format!("\nChecking {} HTML file(s)...", assets.html.len()));
    out.progress(&format!("Checking {} CSS file(s)...", assets.css.len()));
    out.progress(&format!("Checking {} JS file(s)...", assets.js.len()));
    out.progress(&format!("Checking {} image file(s)...", assets.images.len()));
    out.progress("Checking inline scripts and styles...");

    let report = checker.run_assets(&assets);
    out.perf(&report)?;

    Ok(report.has_violations())
}
