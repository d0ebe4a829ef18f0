//! The built-HTML checkers: `a11y` and `seo`.

use anyhow::{bail, Context, Result};
use site_eval_core::{collect_html_files, CheckReport, Config};
use site_eval_rules::{a11y_checker, seo_checker, Suite};
use std::path::Path;

use super::output::Reporter;

/// Runs one HTML suite. Returns true if any violation was found.
pub fn run(suite: Suite, root: &Path, config: &Config, out: &Reporter) -> Result<bool> {
    out.banner(suite);

    let html_files = collect_html_files(&root.join(&config.paths.dist));
    if html_files.is_empty() {
        out.no_input::<CheckReport>(&super::no_html_hint(config))?;
        return Ok(false);
    }

    let checker = match suite {
        Suite::A11y => a11y_checker(root, config),
        Suite::Seo => seo_checker(root, config),
        other => bail!("{} is not an HTML suite", other.name()),
    }
    .context("Failed to build checker")?;

    out.progress(&format!("\nChecking {} HTML file(s)...", html_files.len()));

    let report = checker.run();
    out.check(suite, &report)?;

    Ok(report.has_violations())
}
