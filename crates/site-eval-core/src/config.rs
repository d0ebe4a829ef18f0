//! Configuration tables for the checkers.
//!
//! Every table has a `Default` that holds the fixed rule set; a TOML file
//! may override individual values. Checkers receive the table they need
//! at construction and never read globals.

use miette::Diagnostic;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One kibibyte.
pub const KIB: u64 = 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input locations, relative to the project root.
    pub paths: PathsConfig,
    /// Byte budgets for the performance checker.
    pub budgets: Budgets,
    /// Brand rules.
    pub brand: BrandConfig,
    /// Content-schema tables.
    pub content: ContentConfig,
    /// Structural convention for checker scripts.
    pub rubric: RubricConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a pattern does not compile.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.rubric.compile()?;
        Ok(config)
    }
}

/// Where each checker looks for its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Built site output.
    pub dist: PathBuf,
    /// Page templates, components and source styles.
    pub src: PathBuf,
    /// Documentation directories scanned for file references.
    pub docs: Vec<PathBuf>,
    /// Approved-stats registry.
    pub stats_file: PathBuf,
    /// Blog collection.
    pub blog: PathBuf,
    /// Case-study collection.
    pub case_studies: PathBuf,
    /// Checker scripts covered by the rubric check.
    pub eval: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dist: PathBuf::from("dist"),
            src: PathBuf::from("src"),
            docs: vec![PathBuf::from(".specs"), PathBuf::from(".claude")],
            stats_file: PathBuf::from("content/approved/stats.yaml"),
            blog: PathBuf::from("src/content/blog"),
            case_studies: PathBuf::from("src/content/case-studies"),
            eval: PathBuf::from("scripts/eval"),
        }
    }
}

/// Byte budgets. A size equal to its budget passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budgets {
    /// Per HTML file.
    pub html_file: u64,
    /// Per CSS file.
    pub css_file: u64,
    /// All CSS files together.
    pub css_total: u64,
    /// Per JS file.
    pub js_file: u64,
    /// All JS files together.
    pub js_total: u64,
    /// Per image file.
    pub image_file: u64,
    /// Per inline `<script>` body.
    pub inline_script: u64,
    /// Per inline `<style>` body.
    pub inline_style: u64,
    /// HTML + CSS + JS + images.
    pub total_weight: u64,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            html_file: 100 * KIB,
            css_file: 50 * KIB,
            css_total: 150 * KIB,
            js_file: 100 * KIB,
            js_total: 300 * KIB,
            image_file: 500 * KIB,
            inline_script: 10 * KIB,
            inline_style: 10 * KIB,
            total_weight: 1024 * KIB,
        }
    }
}

/// Brand rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// Font families allowed in `font-family` declarations (case-insensitive).
    pub allowed_fonts: Vec<String>,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            allowed_fonts: ["Open Sans", "Comfortaa", "system-ui", "cursive", "sans-serif"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Content-schema tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Allowed blog `category` values.
    pub blog_categories: Vec<String>,
    /// Allowed case-study `category` values. Empty means any non-empty string.
    pub case_study_categories: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            blog_categories: [
                "digital-marketing",
                "seo",
                "social-media",
                "workflow-optimization",
                "data-analytics",
                "brand-strategy",
                "paid-advertising",
                "creative-design",
                "ai",
                "marketing-strategy",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            case_study_categories: Vec::new(),
        }
    }
}

/// Structural convention every checker script must follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    /// Extension of checker scripts.
    pub extension: String,
    /// File names exempt from the convention (shared helpers).
    pub exempt: Vec<String>,
    /// Pattern for the entry-point definition.
    pub entry_definition: String,
    /// Pattern for the top-level invocation.
    pub entry_invocation: String,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            extension: ".ts".to_string(),
            exempt: vec!["utils.ts".to_string()],
            entry_definition: r"function\s+run\s*\(".to_string(),
            entry_invocation: r"(?m)^run\(\)".to_string(),
        }
    }
}

impl RubricConfig {
    /// Compiles the definition and invocation patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] if either pattern is invalid.
    pub fn compile(&self) -> Result<(Regex, Regex), ConfigError> {
        let compile_one = |pattern: &str| {
            Regex::new(pattern).map_err(|e| ConfigError::Pattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
        };
        Ok((
            compile_one(&self.entry_definition)?,
            compile_one(&self.entry_invocation)?,
        ))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(site_eval::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(
        code(site_eval::config::parse),
        help("tables are [paths], [budgets], [brand], [content] and [rubric]")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A configured pattern is not a valid regex.
    #[error("Invalid pattern `{pattern}`: {message}")]
    #[diagnostic(code(site_eval::config::pattern))]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Regex error message.
        message: String,
    },
}
