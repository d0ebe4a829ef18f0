//! Brand consistency rules.
//!
//! `brand/font` runs over stylesheets and built HTML; the remaining rules
//! run over page templates and components.

use regex::Regex;
use site_eval_core::utils::compile;
use site_eval_core::{BrandConfig, FileContext, Rule, RuleBox, Violation};
use std::sync::LazyLock;

static RE_FONT_FAMILY: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)font-family\s*:\s*"));
static RE_FONT_UTILITY: LazyLock<Regex> = LazyLock::new(|| compile(r#"font-\[['"]?[A-Z]"#));
static RE_ARBITRARY_HEX: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?:bg|text|border|ring|shadow|outline|fill|stroke)-\[#[0-9a-fA-F]{3,8}\]")
});
static RE_RAW_IMG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<img\s"));

/// Characters that may follow a closing quote inside a font list.
const QUOTED_FOLLOWERS: [char; 9] = [',', ';', '}', '!', ')', '"', '\'', '<', '>'];

/// Characters that end an unquoted font entry.
const ENTRY_TERMINATORS: [char; 8] = [',', ';', '}', '!', '<', '>', '"', '\''];

/// Rules applied to stylesheets and built HTML.
#[must_use]
pub fn style_rules(config: &BrandConfig) -> Vec<RuleBox> {
    vec![Box::new(FontFamily::from_config(config))]
}

/// Rules applied to page templates and components.
#[must_use]
pub fn source_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FontUtility),
        Box::new(ArbitraryColor),
        Box::new(RawImg),
    ]
}

/// Splits the value of a `font-family` declaration into its entries.
///
/// `value` starts right after the colon and may run on into unrelated
/// text; parsing stops at the end of the declaration. Quotes around an
/// entry are removed. A quote that does not open an entry is taken as the
/// end of an enclosing attribute value.
fn font_entries(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut rest = value;

    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            break;
        };

        if first == '"' || first == '\'' {
            let Some(close) = rest[1..].find(first) else {
                break;
            };
            let name = rest[1..=close].trim();
            let after = rest[close + 2..].trim_start();
            if !(after.is_empty() || after.starts_with(QUOTED_FOLLOWERS)) {
                break;
            }
            if !name.is_empty() {
                entries.push(name);
            }
            rest = after;
        } else {
            let end = rest.find(ENTRY_TERMINATORS).unwrap_or(rest.len());
            let name = rest[..end].trim();
            if !name.is_empty() {
                entries.push(name);
            }
            rest = &rest[end..];
        }

        match rest.strip_prefix(',') {
            Some(next) => rest = next,
            None => break,
        }
    }

    entries
}

/// `font-family` declarations may only name brand fonts.
#[derive(Debug, Clone)]
pub struct FontFamily {
    allowed: Vec<String>,
}

impl Default for FontFamily {
    fn default() -> Self {
        Self::from_config(&BrandConfig::default())
    }
}

impl FontFamily {
    /// Creates the rule with an explicit allow-list.
    #[must_use]
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// Creates the rule from the brand table.
    #[must_use]
    pub fn from_config(config: &BrandConfig) -> Self {
        Self::new(config.allowed_fonts.clone())
    }

    fn is_allowed(&self, font: &str) -> bool {
        font.eq_ignore_ascii_case("inherit")
            || font.eq_ignore_ascii_case("initial")
            || font.starts_with("var(")
            || self.allowed.iter().any(|a| a.eq_ignore_ascii_case(font))
    }
}

impl Rule for FontFamily {
    fn name(&self) -> &'static str {
        "brand/font"
    }

    fn description(&self) -> &'static str {
        "font-family declarations may only use the brand fonts"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (line_no, line) in ctx.numbered_lines() {
            for decl in RE_FONT_FAMILY.find_iter(line) {
                let entries = font_entries(&line[decl.end()..]);
                if entries.iter().any(|font| !self.is_allowed(font)) {
                    violations.push(
                        Violation::new(
                            self.name(),
                            ctx.relative_path.clone(),
                            line_no,
                            "Use Open Sans or Comfortaa (Sharp End Marketing brand fonts)",
                        )
                        .with_snippet(line.trim()),
                    );
                }
            }
        }
        violations
    }
}

/// Arbitrary Tailwind font values bypass the font utility classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontUtility;

impl Rule for FontUtility {
    fn name(&self) -> &'static str {
        "brand/font-utility"
    }

    fn description(&self) -> &'static str {
        "Use font-heading, font-body or font-accent instead of font-[...] values"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        ctx.numbered_lines()
            .filter(|(_, line)| RE_FONT_UTILITY.is_match(line))
            .map(|(line_no, line)| {
                Violation::new(
                    self.name(),
                    ctx.relative_path.clone(),
                    line_no,
                    "Use font-heading, font-body, or font-accent utility classes instead of arbitrary font values",
                )
                .with_snippet(line.trim())
            })
            .collect()
    }
}

/// Hex colours in utility classes bypass the design tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArbitraryColor;

impl Rule for ArbitraryColor {
    fn name(&self) -> &'static str {
        "brand/arbitrary-color"
    }

    fn description(&self) -> &'static str {
        "Use design token colour classes instead of arbitrary hex values"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (line_no, line) in ctx.numbered_lines() {
            for _ in RE_ARBITRARY_HEX.find_iter(line) {
                violations.push(
                    Violation::new(
                        self.name(),
                        ctx.relative_path.clone(),
                        line_no,
                        "Use design token color classes instead of arbitrary hex values",
                    )
                    .with_snippet(line.trim()),
                );
            }
        }
        violations
    }
}

/// Raw `<img>` tags skip the framework's image optimisation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawImg;

impl RawImg {
    fn is_comment(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.starts_with("//") || trimmed.starts_with('*') || trimmed.starts_with("<!--")
    }
}

impl Rule for RawImg {
    fn name(&self) -> &'static str {
        "brand/raw-img"
    }

    fn description(&self) -> &'static str {
        "Use the <Image /> or <Picture /> component instead of raw <img>"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        ctx.numbered_lines()
            .filter(|(_, line)| RE_RAW_IMG.is_match(line) && !Self::is_comment(line))
            .map(|(line_no, line)| {
                Violation::new(
                    self.name(),
                    ctx.relative_path.clone(),
                    line_no,
                    "Use Astro <Image /> or <Picture /> component instead of raw <img> for optimized images",
                )
                .with_snippet(line.trim())
            })
            .collect()
    }
}
