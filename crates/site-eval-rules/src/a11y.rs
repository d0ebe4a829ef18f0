//! Accessibility rules for built HTML.
//!
//! Pattern-based structural lint, not a DOM parse.
//!
//! | Rule | What it checks |
//! |------|----------------|
//! | `a11y/img-alt` | Every `<img>` carries an `alt` attribute (`alt=""` is fine) |
//! | `a11y/landmark-main` | The document has a `<main>` landmark |
//! | `a11y/empty-link` | No `<a>` with only whitespace inside and no `aria-label` |
//! | `a11y/empty-button` | No `<button>` with only whitespace inside and no `aria-label` |
//! | `a11y/html-lang` | `<html>` carries a `lang` attribute |
//! | `a11y/heading-order` | Heading levels never skip downwards (h2 -> h4) |
//! | `a11y/form-label` | Visible inputs have a label mechanism |

use regex::Regex;
use site_eval_core::utils::compile;
use site_eval_core::utils::patterns::contains_ignore_case;
use site_eval_core::{FileContext, Rule, RuleBox, Violation};
use std::collections::HashSet;
use std::sync::LazyLock;

static RE_IMG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<img\s[^>]*>"));
static RE_ALT_ATTR: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\salt[=\s>]"));
static RE_MAIN: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<main[\s>]"));
static RE_EMPTY_LINK: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<a\s[^>]*>\s*</a>"));
static RE_EMPTY_BUTTON: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<button\s[^>]*>\s*</button>"));
static RE_HTML_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<html(?:\s[^>]*)?>"));
static RE_LANG_ATTR: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)[\s:]lang\s*="));
static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<h([1-6])[\s>]"));
static RE_INPUT: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)<input\s[^>]*>"));
static RE_UNLABELLED_TYPE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)type\s*=\s*["']?(?:hidden|submit|button)"#));
static RE_ARIA_LABEL: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)aria-label\s*="));
static RE_ARIA_LABELLEDBY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)aria-labelledby\s*="));
static RE_TITLE_ATTR: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)\stitle\s*="));
static RE_ID_ATTR: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\sid\s*=\s*["']([^"']+)"#));
static RE_LABEL_FOR: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)<label[^>]+for\s*=\s*["']([^"']+)["']"#));

/// Returns every accessibility rule.
#[must_use]
pub fn rules() -> Vec<RuleBox> {
    vec![
        Box::new(ImgAlt),
        Box::new(LandmarkMain),
        Box::new(EmptyLink),
        Box::new(EmptyButton),
        Box::new(HtmlLang),
        Box::new(HeadingOrder),
        Box::new(FormLabel),
    ]
}

/// Images must carry an `alt` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImgAlt;

impl Rule for ImgAlt {
    fn name(&self) -> &'static str {
        "a11y/img-alt"
    }

    fn description(&self) -> &'static str {
        "Images must have an alt attribute (alt=\"\" for decorative images)"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (line_no, line) in ctx.numbered_lines() {
            for tag in RE_IMG.find_iter(line) {
                if !RE_ALT_ATTR.is_match(tag.as_str()) {
                    violations.push(
                        Violation::new(
                            self.name(),
                            ctx.relative_path.clone(),
                            line_no,
                            "Image missing alt attribute",
                        )
                        .with_snippet(tag.as_str()),
                    );
                }
            }
        }
        violations
    }
}

/// Pages must have a `<main>` landmark.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandmarkMain;

impl Rule for LandmarkMain {
    fn name(&self) -> &'static str {
        "a11y/landmark-main"
    }

    fn description(&self) -> &'static str {
        "Pages must contain a <main> landmark region"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        if RE_MAIN.is_match(ctx.content) {
            return Vec::new();
        }
        vec![Violation::new(
            self.name(),
            ctx.relative_path.clone(),
            1,
            "Page missing <main> landmark region",
        )]
    }
}

fn empty_elements(
    ctx: &FileContext,
    pattern: &Regex,
    rule: &str,
    message: &str,
) -> Vec<Violation> {
    ctx.numbered_lines()
        .filter(|(_, line)| {
            pattern
                .find(line)
                .is_some_and(|m| !contains_ignore_case(m.as_str(), "aria-label"))
        })
        .map(|(line_no, line)| {
            Violation::new(rule, ctx.relative_path.clone(), line_no, message)
                .with_snippet(line.trim())
        })
        .collect()
}

/// Links need text content or an `aria-label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyLink;

impl Rule for EmptyLink {
    fn name(&self) -> &'static str {
        "a11y/empty-link"
    }

    fn description(&self) -> &'static str {
        "Links must have text content or an aria-label"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        empty_elements(
            ctx,
            &RE_EMPTY_LINK,
            self.name(),
            "Empty link: add text content or aria-label",
        )
    }
}

/// Buttons need text content or an `aria-label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyButton;

impl Rule for EmptyButton {
    fn name(&self) -> &'static str {
        "a11y/empty-button"
    }

    fn description(&self) -> &'static str {
        "Buttons must have text content or an aria-label"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        empty_elements(
            ctx,
            &RE_EMPTY_BUTTON,
            self.name(),
            "Empty button: add text content or aria-label",
        )
    }
}

/// Full documents must declare their language.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLang;

impl Rule for HtmlLang {
    fn name(&self) -> &'static str {
        "a11y/html-lang"
    }

    fn description(&self) -> &'static str {
        "The <html> element must have a lang attribute"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let Some(tag) = RE_HTML_TAG.find(ctx.content) else {
            return Vec::new();
        };
        if RE_LANG_ATTR.is_match(tag.as_str()) {
            return Vec::new();
        }
        vec![Violation::new(
            self.name(),
            ctx.relative_path.clone(),
            ctx.line_of(tag.start()),
            "<html> element missing lang attribute",
        )
        .with_snippet(tag.as_str())]
    }
}

/// Heading levels may go up any amount but down only one step at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingOrder;

impl Rule for HeadingOrder {
    fn name(&self) -> &'static str {
        "a11y/heading-order"
    }

    fn description(&self) -> &'static str {
        "Heading levels must not be skipped"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut last_level: u32 = 0;

        for (line_no, line) in ctx.numbered_lines() {
            for caps in RE_HEADING.captures_iter(line) {
                let Some(level) = caps[1].parse::<u32>().ok() else {
                    continue;
                };
                if last_level > 0 && level > last_level + 1 {
                    violations.push(
                        Violation::new(
                            self.name(),
                            ctx.relative_path.clone(),
                            line_no,
                            format!(
                                "Heading level skipped: h{last_level} -> h{level} (expected h{} or lower)",
                                last_level + 1
                            ),
                        )
                        .with_snippet(line.trim()),
                    );
                }
                last_level = level;
            }
        }

        violations
    }
}

/// Form inputs need an accessible name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormLabel;

impl FormLabel {
    fn label_targets(content: &str) -> HashSet<&str> {
        RE_LABEL_FOR
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}

impl Rule for FormLabel {
    fn name(&self) -> &'static str {
        "a11y/form-label"
    }

    fn description(&self) -> &'static str {
        "Inputs must have a <label>, aria-label, aria-labelledby or title"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut targets: Option<HashSet<&str>> = None;

        for (line_no, line) in ctx.numbered_lines() {
            for tag in RE_INPUT.find_iter(line) {
                let tag = tag.as_str();
                if RE_UNLABELLED_TYPE.is_match(tag) {
                    continue;
                }
                if RE_ARIA_LABEL.is_match(tag)
                    || RE_ARIA_LABELLEDBY.is_match(tag)
                    || RE_TITLE_ATTR.is_match(tag)
                {
                    continue;
                }

                let message = match RE_ID_ATTR.captures(tag).and_then(|c| c.get(1)) {
                    Some(id) => {
                        let targets =
                            targets.get_or_insert_with(|| Self::label_targets(ctx.content));
                        if targets.contains(id.as_str()) {
                            continue;
                        }
                        format!(
                            "Input#{} has no associated <label>, aria-label, or aria-labelledby",
                            id.as_str()
                        )
                    }
                    None => "Input has no id, aria-label, or aria-labelledby for labelling"
                        .to_string(),
                };

                violations.push(
                    Violation::new(self.name(), ctx.relative_path.clone(), line_no, message)
                        .with_snippet(tag),
                );
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn check_html<R: Rule>(rule: &R, html: &str) -> Vec<Violation> {
        let ctx = FileContext::from_source(Path::new("dist/index.html"), html);
        rule.check(&ctx)
    }

    #[test]
    fn img_without_alt_reports_its_line() {
        let html = "<html>\n<body>\n<main>\n<p>x</p>\n<img src=\"x.png\">\n</main>";
        let violations = check_html(&ImgAlt, html);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "a11y/img-alt");
        assert_eq!(violations[0].line, 5);
        assert_eq!(violations[0].snippet, "<img src=\"x.png\">");
    }

    #[test]
    fn empty_alt_is_decorative() {
        assert!(check_html(&ImgAlt, "<img src=\"x.png\" alt=\"\">").is_empty());
        assert!(check_html(&ImgAlt, "<img src=\"x.png\" ALT=\"Logo\">").is_empty());
        assert!(check_html(&ImgAlt, "<img src=\"x.png\" alt>").is_empty());
    }

    #[test]
    fn several_images_on_one_line() {
        let violations = check_html(&ImgAlt, "<img src=\"a\"><img src=\"b\" alt=\"b\"><img src=\"c\">");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn data_alt_is_not_alt() {
        let violations = check_html(&ImgAlt, "<img src=\"a\" data-alt=\"x\">");
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn missing_main_reported_at_line_one() {
        let violations = check_html(&LandmarkMain, "<html>\n<body><div>x</div></body>");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
        assert!(violations[0].snippet.is_empty());
        assert!(check_html(&LandmarkMain, "<body><main id=\"c\">x</main>").is_empty());
        assert!(check_html(&LandmarkMain, "<MAIN>x</MAIN>").is_empty());
    }

    #[test]
    fn empty_link_without_label() {
        let html = "<nav>\n  <a href=\"/\"> </a>\n  <a href=\"/x\" aria-label=\"Home\"></a>\n  <a href=\"/y\">Text</a>\n</nav>";
        let violations = check_html(&EmptyLink, html);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].snippet, "<a href=\"/\"> </a>");
    }

    #[test]
    fn empty_button_without_label() {
        let html = "<button type=\"button\"></button>\n<button class=\"x\" aria-label=\"Close\"></button>";
        let violations = check_html(&EmptyButton, html);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "a11y/empty-button");
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn html_lang_required_on_documents_only() {
        assert_eq!(check_html(&HtmlLang, "<!doctype html>\n<html>\n<body>").len(), 1);
        assert!(check_html(&HtmlLang, "<html lang=\"en\">").is_empty());
        assert!(check_html(&HtmlLang, "<html class=\"dark\" lang=\"en-GB\">").is_empty());
        assert!(check_html(&HtmlLang, "<div>fragment</div>").is_empty());
        assert!(check_html(&HtmlLang, "<html xml:lang=\"en\">").is_empty());
        assert_eq!(check_html(&HtmlLang, "<html data-lang=\"en\">").len(), 1);
    }

    #[test]
    fn html_lang_reports_tag_line() {
        let violations = check_html(&HtmlLang, "<!doctype html>\n<html class=\"x\">");
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].snippet, "<html class=\"x\">");
    }

    #[test]
    fn heading_jump_is_reported_once() {
        let html = "<h1>A</h1>\n<h2>B</h2>\n<h4>C</h4>";
        let violations = check_html(&HeadingOrder, html);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
        assert!(violations[0].message.contains("h2 -> h4"));
    }

    #[test]
    fn heading_sequence_without_skips() {
        assert!(check_html(&HeadingOrder, "<h1>A</h1><h2>B</h2><h3>C</h3>").is_empty());
        assert!(check_html(&HeadingOrder, "<h2>A</h2>\n<h3>B</h3>\n<h1>C</h1>\n<h2>D</h2>").is_empty());
    }

    #[test]
    fn first_heading_may_be_any_level() {
        assert!(check_html(&HeadingOrder, "<h3 class=\"eyebrow\">A</h3>").is_empty());
    }

    #[test]
    fn header_tag_is_not_a_heading() {
        assert!(check_html(&HeadingOrder, "<h1>A</h1><header>x</header><h2>B</h2>").is_empty());
    }

    #[test]
    fn input_with_matching_label() {
        let html = "<label for=\"email\">Email</label>\n<input id=\"email\" type=\"email\">";
        assert!(check_html(&FormLabel, html).is_empty());
    }

    #[test]
    fn input_with_id_but_no_label() {
        let html = "<form>\n<input id=\"email\" type=\"email\">\n</form>";
        let violations = check_html(&FormLabel, html);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert!(violations[0].message.contains("Input#email"));
    }

    #[test]
    fn input_without_any_label_mechanism() {
        let violations = check_html(&FormLabel, "<input type=\"text\" name=\"q\">");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.starts_with("Input has no id"));
    }

    #[test]
    fn inputs_exempt_from_labelling() {
        let html = "<input type=\"hidden\" name=\"t\">\n<input type='submit' value='Go'>\n<input type=button value=x>\n<input type=\"text\" aria-label=\"Search\">\n<input type=\"text\" aria-labelledby=\"l\">\n<input type=\"text\" title=\"Search\">";
        assert!(check_html(&FormLabel, html).is_empty());
    }

    #[test]
    fn all_rules_are_registered() {
        let names: Vec<_> = rules().iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 7);
        assert!(names.iter().all(|n| n.starts_with("a11y/")));
    }
}
