//! SEO rules for built HTML.

use regex::Regex;
use site_eval_core::utils::compile;
use site_eval_core::{FileContext, Rule, RuleBox, Violation};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Title length above which `seo/title-length` fires.
pub const TITLE_MAX_CHARS: usize = 70;

/// Meta description length above which `seo/meta-description-length` fires.
pub const DESCRIPTION_MAX_CHARS: usize = 160;

/// Length rules reported alongside `seo/title` and `seo/meta-description`.
pub const LENGTH_RULES: [(&str, &str); 2] = [
    ("seo/title-length", "Titles should be at most 70 characters"),
    (
        "seo/meta-description-length",
        "Meta descriptions should be at most 160 characters",
    ),
];

/// Open Graph properties every page must declare.
pub const REQUIRED_OPEN_GRAPH: [&str; 3] = ["og:title", "og:description", "og:type"];

static RE_TITLE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?is)<title[^>]*>(.*?)</title>"));
static RE_META_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i)<meta\s[^>]*name\s*=\s*["']description["'][^>]*>"#)
});
static RE_CONTENT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)content\s*=\s*["']([^"']*)["']"#));
static RE_CANONICAL: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)<link\s[^>]*rel\s*=\s*["']canonical["'][^>]*>"#));
static RE_META_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)<meta\s[^>]*property\s*=\s*["']([^"']+)["'][^>]*>"#));
static RE_JSON_LD: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i)<script\s[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>"#)
});
static RE_ANCHOR_HREF: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)<a\s[^>]*href\s*=\s*["']([^"']*)["'][^>]*>"#));

/// Returns every SEO rule.
#[must_use]
pub fn rules() -> Vec<RuleBox> {
    vec![
        Box::new(Title),
        Box::new(MetaDescription),
        Box::new(Canonical),
        Box::new(OpenGraph),
        Box::new(StructuredData),
        Box::new(BrokenLink),
    ]
}

fn document_violation(rule: &str, ctx: &FileContext, message: impl Into<String>) -> Violation {
    Violation::new(rule, ctx.relative_path.clone(), 1, message)
}

/// Pages need a non-empty `<title>` of reasonable length.
///
/// Reports `seo/title` when the tag is missing or empty and
/// `seo/title-length` when it is too long.
#[derive(Debug, Clone, Copy, Default)]
pub struct Title;

impl Rule for Title {
    fn name(&self) -> &'static str {
        "seo/title"
    }

    fn description(&self) -> &'static str {
        "Pages must have a non-empty <title> of at most 70 characters"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let Some(caps) = RE_TITLE.captures(ctx.content) else {
            return vec![document_violation(
                self.name(),
                ctx,
                "Page missing <title> tag",
            )];
        };

        let tag = &caps[0];
        let line = caps.get(0).map_or(1, |m| ctx.line_of(m.start()));
        let title = caps[1].trim();
        let length = title.chars().count();

        if title.is_empty() {
            vec![
                Violation::new(self.name(), ctx.relative_path.clone(), line, "<title> tag is empty")
                    .with_snippet(tag),
            ]
        } else if length > TITLE_MAX_CHARS {
            vec![Violation::new(
                LENGTH_RULES[0].0,
                ctx.relative_path.clone(),
                line,
                format!("Title too long: {length} chars (recommended: <={TITLE_MAX_CHARS})"),
            )
            .with_snippet(title)]
        } else {
            Vec::new()
        }
    }
}

/// Pages need a non-empty meta description of reasonable length.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaDescription;

impl Rule for MetaDescription {
    fn name(&self) -> &'static str {
        "seo/meta-description"
    }

    fn description(&self) -> &'static str {
        "Pages must have a non-empty meta description of at most 160 characters"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let Some(tag) = RE_META_DESCRIPTION.find(ctx.content) else {
            return vec![document_violation(
                self.name(),
                ctx,
                "Page missing meta description",
            )];
        };

        let line = ctx.line_of(tag.start());
        let content = RE_CONTENT_ATTR
            .captures(tag.as_str())
            .and_then(|c| c.get(1))
            .map_or("", |m| m.as_str().trim());
        let length = content.chars().count();

        if content.is_empty() {
            vec![Violation::new(
                self.name(),
                ctx.relative_path.clone(),
                line,
                "Meta description is empty",
            )
            .with_snippet(tag.as_str())]
        } else if length > DESCRIPTION_MAX_CHARS {
            vec![Violation::new(
                LENGTH_RULES[1].0,
                ctx.relative_path.clone(),
                line,
                format!(
                    "Meta description too long: {length} chars (recommended: <={DESCRIPTION_MAX_CHARS})"
                ),
            )
            .with_snippet(content)]
        } else {
            Vec::new()
        }
    }
}

/// Pages need a canonical link.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonical;

impl Rule for Canonical {
    fn name(&self) -> &'static str {
        "seo/canonical"
    }

    fn description(&self) -> &'static str {
        "Pages must have a <link rel=\"canonical\">"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if RE_CANONICAL.is_match(ctx.content) {
            Vec::new()
        } else {
            vec![document_violation(
                self.name(),
                ctx,
                "Page missing canonical link tag",
            )]
        }
    }
}

/// Pages need the core Open Graph properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGraph;

impl Rule for OpenGraph {
    fn name(&self) -> &'static str {
        "seo/open-graph"
    }

    fn description(&self) -> &'static str {
        "Pages must declare og:title, og:description and og:type"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let present: HashSet<String> = RE_META_PROPERTY
            .captures_iter(ctx.content)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_ascii_lowercase())
            .collect();

        REQUIRED_OPEN_GRAPH
            .iter()
            .filter(|prop| !present.contains(**prop))
            .map(|prop| {
                document_violation(self.name(), ctx, format!("Missing Open Graph tag: {prop}"))
            })
            .collect()
    }
}

/// Pages need a JSON-LD block.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredData;

impl Rule for StructuredData {
    fn name(&self) -> &'static str {
        "seo/structured-data"
    }

    fn description(&self) -> &'static str {
        "Pages must include JSON-LD structured data"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if RE_JSON_LD.is_match(ctx.content) {
            Vec::new()
        } else {
            vec![document_violation(
                self.name(),
                ctx,
                "Page missing JSON-LD structured data",
            )]
        }
    }
}

/// Anchors must not point at `#` or an empty href.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenLink;

impl Rule for BrokenLink {
    fn name(&self) -> &'static str {
        "seo/broken-link"
    }

    fn description(&self) -> &'static str {
        "Links must not use an empty or \"#\" href"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (line_no, line) in ctx.numbered_lines() {
            for caps in RE_ANCHOR_HREF.captures_iter(line) {
                let href = &caps[1];
                if href == "#" || href.is_empty() {
                    violations.push(
                        Violation::new(
                            self.name(),
                            ctx.relative_path.clone(),
                            line_no,
                            format!("Link with empty or placeholder href: \"{href}\""),
                        )
                        .with_snippet(&caps[0]),
                    );
                }
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const GOOD_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<title>Sharp End Marketing</title>
<meta name="description" content="Marketing that gets to the point.">
<link rel="canonical" href="https://example.com/">
<meta property="og:title" content="Sharp End">
<meta property="og:description" content="Marketing">
<meta property="og:type" content="website">
<script type="application/ld+json">{"@type":"Organization"}</script>
</head>
<body><main><a href="/about">About</a></main></body>
</html>"#;

    fn check_all(html: &str) -> Vec<Violation> {
        let ctx = FileContext::from_source(Path::new("dist/index.html"), html);
        rules().iter().flat_map(|r| r.check(&ctx)).collect()
    }

    fn check_html<R: Rule>(rule: &R, html: &str) -> Vec<Violation> {
        let ctx = FileContext::from_source(Path::new("dist/index.html"), html);
        rule.check(&ctx)
    }

    #[test]
    fn complete_head_passes() {
        assert!(check_all(GOOD_HEAD).is_empty());
    }

    #[test]
    fn bare_fragment_reports_every_document_rule() {
        let violations = check_all("<p>hello</p>");
        let rules: Vec<_> = violations.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(
            rules,
            vec![
                "seo/title",
                "seo/meta-description",
                "seo/canonical",
                "seo/open-graph",
                "seo/open-graph",
                "seo/open-graph",
                "seo/structured-data",
            ]
        );
        assert!(violations.iter().all(|v| v.line == 1));
    }

    #[test]
    fn empty_and_long_titles() {
        let empty = check_html(&Title, "<head>\n<title>  </title>");
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].rule, "seo/title");
        assert_eq!(empty[0].message, "<title> tag is empty");
        assert_eq!(empty[0].line, 2);

        let long = format!("<title>{}</title>", "a".repeat(71));
        let violations = check_html(&Title, &long);
        assert_eq!(violations[0].rule, "seo/title-length");
        assert!(violations[0].message.contains("71 chars"));

        let exact = format!("<title>{}</title>", "a".repeat(70));
        assert!(check_html(&Title, &exact).is_empty());
    }

    #[test]
    fn multiline_title() {
        assert!(check_html(&Title, "<title>\n  Home\n</title>").is_empty());
    }

    #[test]
    fn meta_description_variants() {
        let empty = check_html(&MetaDescription, r#"<meta name="description" content="">"#);
        assert_eq!(empty[0].message, "Meta description is empty");

        let long = format!(r#"<meta name="description" content="{}">"#, "d".repeat(161));
        let violations = check_html(&MetaDescription, &long);
        assert_eq!(violations[0].rule, "seo/meta-description-length");

        let reordered = r#"<meta content="Marketing agency" name='description'>"#;
        assert!(check_html(&MetaDescription, reordered).is_empty());
    }

    #[test]
    fn one_violation_per_missing_open_graph_property() {
        let html = r#"<meta property="og:title" content="x"><meta property="OG:TYPE" content="website">"#;
        let violations = check_html(&OpenGraph, html);
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].to_string(), @"dist/index.html:1: [seo/open-graph] Missing Open Graph tag: og:description");
    }

    #[test]
    fn placeholder_links() {
        let html = "<a href=\"#\">Top</a>\n<a class=\"x\" href=\"\">Empty</a>\n<a href=\"#team\">Team</a>";
        let violations = check_html(&BrokenLink, html);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].line, 1);
        assert_eq!(violations[0].message, "Link with empty or placeholder href: \"#\"");
        assert_eq!(violations[1].line, 2);
        assert_eq!(violations[1].snippet, "<a class=\"x\" href=\"\">");
    }
}
