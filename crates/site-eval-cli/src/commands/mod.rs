//! One module per subcommand, plus shared report output.

pub mod brand;
pub mod consistency;
pub mod frontmatter;
pub mod html;
pub mod list_rules;
pub mod output;
pub mod perf;

use anyhow::{bail, Result};
use site_eval_core::Config;
use std::path::Path;

/// Loads the configuration named by `--config`, or the defaults.
///
/// Config errors are rendered as diagnostics on stderr before the command
/// fails.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    match Config::from_file(path) {
        Ok(config) => {
            tracing::info!("Using config: {}", path.display());
            Ok(config)
        }
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            bail!("Failed to load config: {}", path.display())
        }
    }
}

/// Hint printed when a built-output checker finds no HTML.
pub fn no_html_hint(config: &Config) -> String {
    format!(
        "No HTML files found in {}/. Run the site build first.",
        config.paths.dist.display()
    )
}
