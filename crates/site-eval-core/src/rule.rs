//! Rule traits for defining checks.

use crate::context::{FileContext, ProjectContext};
use crate::types::{CheckReport, Violation};

/// A per-file check over text content.
///
/// # Example
///
/// ```ignore
/// use site_eval_core::{FileContext, Rule, Violation};
///
/// pub struct NoMarquee;
///
/// impl Rule for NoMarquee {
///     fn name(&self) -> &'static str { "a11y/no-marquee" }
///
///     fn check(&self, ctx: &FileContext) -> Vec<Violation> {
///         ctx.numbered_lines()
///             .filter(|(_, line)| line.contains("<marquee"))
///             .map(|(n, line)| {
///                 Violation::new(self.name(), ctx.relative_path.clone(), n, "Avoid <marquee>")
///                     .with_snippet(line.trim())
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule identifier in `<domain>/<check-name>` form.
    ///
    /// Rules that report more than one identifier return the primary one.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A project-wide check that gathers its own inputs from the filesystem.
pub trait ProjectRule: Send + Sync {
    /// Returns the rule identifier.
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks the project.
    ///
    /// The returned report carries violations, the number of files read,
    /// and any informational notes (e.g. a skipped sub-check).
    fn check_project(&self, ctx: &ProjectContext) -> CheckReport;
}

/// Type alias for boxed `ProjectRule` trait objects.
pub type ProjectRuleBox = Box<dyn ProjectRule>;
