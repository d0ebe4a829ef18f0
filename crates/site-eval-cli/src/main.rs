//! site-eval CLI tool.
//!
//! Usage:
//! ```bash
//! site-eval [--root PATH] [--config PATH] a11y [--format text|json|compact]
//! site-eval perf
//! site-eval list-rules
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use site_eval_core::{exit_code, resolve_root};
use site_eval_rules::Suite;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Quality gates for the built site and its content
#[derive(Parser)]
#[command(name = "site-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project root the input paths resolve against
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check built HTML for accessibility problems
    A11y,
    /// Check fonts, colours and images against the brand rules
    Brand,
    /// Check built HTML for SEO tags
    Seo,
    /// Check built output against the byte budgets
    Perf,
    /// Check docs, stat citations and checker scripts for consistency
    Consistency,
    /// Validate content frontmatter against the collection schemas
    Frontmatter,
    /// List available rules
    ListRules,
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if matches!(cli.command, Commands::ListRules) {
        commands::list_rules::run();
        return Ok(());
    }

    let config = commands::load_config(cli.config.as_deref())?;
    let root = resolve_root(&cli.root).context("Failed to resolve project root")?;
    let out = commands::output::Reporter::new(cli.format);

    let failed = match cli.command {
        Commands::A11y => commands::html::run(Suite::A11y, &root, &config, &out)?,
        Commands::Seo => commands::html::run(Suite::Seo, &root, &config, &out)?,
        Commands::Brand => commands::brand::run(&root, &config, &out)?,
        Commands::Perf => commands::perf::run(&root, &config, &out)?,
        Commands::Consistency => commands::consistency::run(&root, &config, &out)?,
        Commands::Frontmatter => commands::frontmatter::run(&root, &config, &out)?,
        Commands::ListRules => false,
    };

    if failed {
        std::process::exit(exit_code(true));
    }

    Ok(())
}
