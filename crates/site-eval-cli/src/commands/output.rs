//! Shared output formatting for check reports.
//!
//! Text output is rendered into a `String` first so the layout can be
//! snapshot-tested; banners and progress lines appear in text mode only.

use anyhow::Result;
use serde::Serialize;
use site_eval_core::utils::format_bytes;
use site_eval_core::CheckReport;
use site_eval_rules::{PerfReport, Suite, ValidationReport};
use std::fmt::Write;

use crate::OutputFormat;

const RULE_WIDTH: usize = 50;
const VALIDATION_RULE_WIDTH: usize = 60;
const SITE_NAME: &str = "Sharp End Marketing";

/// Prints banners, progress and final reports in one format.
pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    /// Creates a reporter for `format`.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }

    /// Title line and rule.
    pub fn banner(&self, suite: Suite) {
        if self.is_text() {
            println!("{SITE_NAME} - {}", suite.title());
            println!("{}", "=".repeat(RULE_WIDTH));
        }
    }

    /// One progress line.
    pub fn progress(&self, line: &str) {
        if self.is_text() {
            println!("{line}");
        }
    }

    /// Reports a run that found nothing to check.
    pub fn no_input<T: Serialize + Default>(&self, hint: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => println!("\nWarning: {hint}"),
            OutputFormat::Json => print_json(&T::default())?,
            OutputFormat::Compact => {}
        }
        Ok(())
    }

    /// Prints a line-addressable report.
    pub fn check(&self, suite: Suite, report: &CheckReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => print!("{}", render_check(suite, report)?),
            OutputFormat::Json => print_json(report)?,
            OutputFormat::Compact => {
                for violation in &report.violations {
                    println!("{violation}");
                }
            }
        }
        Ok(())
    }

    /// Prints a budget report.
    pub fn perf(&self, report: &PerfReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => print!("{}", render_perf(report)?),
            OutputFormat::Json => print_json(report)?,
            OutputFormat::Compact => {
                for violation in &report.violations {
                    println!("{violation}");
                }
            }
        }
        Ok(())
    }

    /// Prints a frontmatter validation report.
    pub fn validation(&self, report: &ValidationReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => print!("{}", render_validation(report)?),
            OutputFormat::Json => print_json(report)?,
            OutputFormat::Compact => {
                for error in &report.errors {
                    println!("{error}");
                }
            }
        }
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn header(out: &mut String, title: &str, width: usize) -> std::fmt::Result {
    let rule = "=".repeat(width);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}

fn render_check(suite: Suite, report: &CheckReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    for note in &report.notes {
        writeln!(out, "  Note: {note}")?;
    }

    header(&mut out, suite.report_title(), RULE_WIDTH)?;

    if report.has_violations() {
        writeln!(
            out,
            "\nFAIL: {} violation(s) found:",
            report.violations.len()
        )?;
        for (rule, violations) in report.by_rule() {
            writeln!(out, "\n  {rule} ({})", violations.len())?;
            for v in violations {
                out.push_str(&v.format());
            }
        }
    } else {
        writeln!(
            out,
            "\nPASS: No {} violations found in {} file(s).",
            suite.name(),
            report.files_checked
        )?;
    }

    writeln!(out)?;
    Ok(out)
}

fn render_perf(report: &PerfReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    header(&mut out, Suite::Perf.report_title(), RULE_WIDTH)?;

    writeln!(out)?;
    for (label, total) in report.categories() {
        let label = format!("{label}:");
        writeln!(
            out,
            "  {label:<8}{} ({} files)",
            format_bytes(total.bytes),
            total.files
        )?;
    }
    writeln!(out, "  {:<8}{}", "Total:", format_bytes(report.total_weight()))?;

    if report.has_violations() {
        writeln!(
            out,
            "\nFAIL: {} budget violation(s):\n",
            report.violations.len()
        )?;
        for v in &report.violations {
            writeln!(out, "  {}", v.rule)?;
            writeln!(out, "    {}: {}", v.file.display(), v.message)?;
        }
    } else {
        writeln!(out, "\nPASS: All performance budgets met.")?;
    }

    writeln!(out)?;
    Ok(out)
}

fn render_validation(report: &ValidationReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    for collection in &report.collections {
        if collection.files == 0 {
            writeln!(out, "\n{}: no content files found", collection.name)?;
        } else {
            writeln!(
                out,
                "\n{}: checking {} file(s)",
                collection.name, collection.files
            )?;
        }
    }

    header(
        &mut out,
        Suite::Frontmatter.report_title(),
        VALIDATION_RULE_WIDTH,
    )?;

    if report.has_errors() {
        writeln!(
            out,
            "\nFAIL: {} error(s) in {} file(s):\n",
            report.errors.len(),
            report.files_checked()
        )?;
        for error in &report.errors {
            writeln!(out, "  {}", error.file.display())?;
            writeln!(out, "    -> {}: {}", error.field, error.message)?;
        }
    } else {
        writeln!(
            out,
            "\nPASS: All {} file(s) passed validation.",
            report.files_checked()
        )?;
    }

    writeln!(out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_eval_core::{PerfViolation, ValidationError, Violation};
    use site_eval_rules::CollectionSummary;

    #[test]
    fn clean_check_report() {
        let report = CheckReport {
            files_checked: 3,
            ..CheckReport::default()
        };
        insta::assert_snapshot!(render_check(Suite::A11y, &report).unwrap().trim(), @r"
        ==================================================
        Accessibility Report
        ==================================================

        PASS: No a11y violations found in 3 file(s).
        ");
    }

    #[test]
    fn violations_are_grouped_by_rule() {
        let mut report = CheckReport::new();
        report.files_checked = 2;
        report.violations = vec![
            Violation::new("a11y/img-alt", "dist/index.html", 5, "Image missing alt attribute")
                .with_snippet("<img src=\"x.png\">"),
            Violation::new("a11y/landmark-main", "dist/404.html", 1, "Page missing <main> landmark region"),
            Violation::new("a11y/img-alt", "dist/about/index.html", 9, "Image missing alt attribute")
                .with_snippet("<img src=\"y.png\">"),
        ];

        let text = render_check(Suite::A11y, &report).unwrap();
        assert!(text.contains("FAIL: 3 violation(s) found:"));
        let img = text.find("a11y/img-alt (2)").unwrap();
        let main = text.find("a11y/landmark-main (1)").unwrap();
        assert!(img < main);
        assert!(text.contains("    dist/index.html:5\n      Image missing alt attribute\n      > <img src=\"x.png\">\n"));
        assert!(!text.contains("dist/404.html:1\n      Page missing <main> landmark region\n      >"));
    }

    #[test]
    fn notes_precede_the_report() {
        let mut report = CheckReport::new();
        report.note("No stats found in stats.yaml; skipping");
        let text = render_check(Suite::Consistency, &report).unwrap();
        assert!(text.starts_with("  Note: No stats found in stats.yaml; skipping\n"));
        assert!(text.contains("Consistency Report"));
    }

    #[test]
    fn perf_report_lists_categories() {
        let mut report = PerfReport::default();
        report.html.files = 2;
        report.html.bytes = 2048;
        report.violations.push(PerfViolation::new(
            "perf/html-size",
            "dist/index.html",
            "HTML file exceeds budget: 100.0KB > 100.0KB",
            102_401,
            102_400,
        ));

        let text = render_perf(&report).unwrap();
        assert!(text.contains("  HTML:   2.0KB (2 files)\n"));
        assert!(text.contains("  Images: 0B (0 files)\n"));
        assert!(text.contains("  Total:  2.0KB\n"));
        assert!(text.contains("FAIL: 1 budget violation(s):"));
        assert!(text.contains("  perf/html-size\n    dist/index.html: HTML file exceeds budget"));
    }

    #[test]
    fn validation_report_layout() {
        let report = ValidationReport {
            collections: vec![
                CollectionSummary {
                    name: "blog".to_string(),
                    files: 1,
                },
                CollectionSummary {
                    name: "case-studies".to_string(),
                    files: 0,
                },
            ],
            errors: vec![ValidationError::new(
                "src/content/blog/a.md",
                "hero.lead",
                "Required",
            )],
        };

        insta::assert_snapshot!(render_validation(&report).unwrap().trim(), @r"
        blog: checking 1 file(s)

        case-studies: no content files found

        ============================================================
        Frontmatter Validation Report
        ============================================================

        FAIL: 1 error(s) in 1 file(s):

          src/content/blog/a.md
            -> hero.lead: Required
        ");
    }
}
