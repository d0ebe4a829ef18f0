//! Integration test: every suite end-to-end over a fixture site.
//!
//! Each test writes a small project tree into a temp directory and runs
//! one suite through its public entry point with the default config.

use site_eval_core::{Config, KIB};
use site_eval_rules::{
    a11y_checker, brand_checker, consistency_checker, seo_checker, FrontmatterValidator,
    PerfChecker,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir should be created"),
        }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().expect("fixture path has a parent"))
            .expect("fixture dirs should be created");
        fs::write(path, content).expect("fixture file should be written");
        self
    }
}

const GOOD_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<title>Sharp End Marketing</title>
<meta name="description" content="Marketing that gets to the point.">
<link rel="canonical" href="https://sharpend.example/">
<meta property="og:title" content="Sharp End">
<meta property="og:description" content="Marketing">
<meta property="og:type" content="website">
<script type="application/ld+json">{"@type":"Organization"}</script>
</head>
<body>
<main>
<h1>Hello</h1>
<h2>Services</h2>
<img src="/hero.webp" alt="">
<a href="/contact">Contact</a>
</main>
</body>
</html>
"#;

// ── a11y ──

#[test]
fn a11y_reports_image_line_and_heading_jump() {
    let site = Site::new();
    site.write("dist/index.html", GOOD_PAGE).write(
        "dist/about/index.html",
        "<html lang=\"en\">\n<body>\n<main>\n<h1>About</h1>\n<img src=\"x.png\">\n<h2>Team</h2>\n<h4>Leads</h4>\n</main>\n</body>\n</html>\n",
    );

    let report = a11y_checker(site.root(), &Config::default())
        .expect("suite should build")
        .run();

    assert_eq!(report.files_checked, 2);
    assert_eq!(report.violations.len(), 2, "{:#?}", report.violations);

    let img = &report.violations[0];
    assert_eq!(img.rule, "a11y/img-alt");
    assert_eq!(img.file, PathBuf::from("dist/about/index.html"));
    assert_eq!(img.line, 5);

    let heading = &report.violations[1];
    assert_eq!(heading.rule, "a11y/heading-order");
    assert!(heading.message.contains("h2 -> h4"));
}

#[test]
fn a11y_clean_site() {
    let site = Site::new();
    site.write("dist/index.html", GOOD_PAGE);
    let report = a11y_checker(site.root(), &Config::default())
        .unwrap()
        .run();
    assert!(!report.has_violations());
}

#[test]
fn missing_build_output_checks_nothing() {
    let site = Site::new();
    let report = a11y_checker(site.root(), &Config::default())
        .unwrap()
        .run();
    assert_eq!(report.files_checked, 0);
    assert!(!report.has_violations());
}

#[test]
fn dependency_directory_is_not_scanned() {
    let site = Site::new();
    site.write("dist/index.html", GOOD_PAGE)
        .write("dist/node_modules/pkg/index.html", "<img src=\"x.png\">");
    let report = a11y_checker(site.root(), &Config::default())
        .unwrap()
        .run();
    assert_eq!(report.files_checked, 1);
    assert!(!report.has_violations());
}

// ── brand ──

#[test]
fn brand_flags_disallowed_font_only() {
    let site = Site::new();
    site.write(
        "dist/_astro/site.css",
        "body{font-family:\"Open Sans\",sans-serif}\n.x { font-family: Arial, sans-serif; }\n",
    )
    .write(
        "src/styles/global.css",
        "h1 { font-family: 'Comfortaa', cursive; }\n",
    )
    .write(
        "src/components/Card.astro",
        "<div class=\"bg-[#123456] font-heading\">\n  <img src=\"/a.png\" alt=\"a\">\n</div>\n",
    );

    let checker = brand_checker(site.root(), &Config::default()).unwrap();
    assert_eq!(checker.scan_sizes(), vec![1, 1, 1]);

    let report = checker.run();
    let rules: Vec<_> = report.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(
        rules,
        vec!["brand/font", "brand/arbitrary-color", "brand/raw-img"]
    );
    assert_eq!(report.violations[0].line, 2);
    assert_eq!(report.violations[2].line, 2);
}

// ── seo ──

#[test]
fn seo_reports_each_missing_tag() {
    let site = Site::new();
    site.write("dist/index.html", GOOD_PAGE).write(
        "dist/blank/index.html",
        "<html lang=\"en\"><head><title></title></head>\n<body><main><a href=\"#\">Top</a></main></body></html>",
    );

    let report = seo_checker(site.root(), &Config::default()).unwrap().run();
    assert!(report
        .violations
        .iter()
        .all(|v| v.file == PathBuf::from("dist/blank/index.html")));
    assert_eq!(report.count_rule("seo/title"), 1);
    assert_eq!(report.count_rule("seo/open-graph"), 3);
    assert_eq!(report.count_rule("seo/broken-link"), 1);
    assert_eq!(report.count_rule("seo/canonical"), 1);
}

// ── perf ──

#[test]
fn html_size_boundary_is_strict() {
    let site = Site::new();
    let budget = usize::try_from(100 * KIB).unwrap();
    site.write("dist/at-budget.html", "a".repeat(budget))
        .write("dist/over-budget.html", "a".repeat(budget + 1));

    let report = PerfChecker::from_config(site.root(), &Config::default()).run();

    assert_eq!(report.violations.len(), 1, "{:#?}", report.violations);
    let violation = &report.violations[0];
    assert_eq!(violation.rule, "perf/html-size");
    assert_eq!(violation.file, PathBuf::from("dist/over-budget.html"));
    assert_eq!(violation.actual, 100 * KIB + 1);
    assert_eq!(violation.budget, 100 * KIB);
    assert_eq!(report.html.files, 2);
}

#[test]
fn perf_totals_by_category() {
    let site = Site::new();
    site.write("dist/index.html", GOOD_PAGE)
        .write("dist/a.css", "a".repeat(60 * 1024))
        .write("dist/b.css", "b".repeat(100 * 1024))
        .write("dist/app.js", "c".repeat(10))
        .write("dist/img/hero.webp", "d".repeat(20))
        .write("dist/img/logo.svg", "e".repeat(30));

    let report = PerfChecker::from_config(site.root(), &Config::default()).run();

    let rules: Vec<_> = report.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["perf/css-size", "perf/css-size", "perf/css-total"]);
    assert_eq!(report.violations[2].file, PathBuf::from("(total)"));
    assert_eq!(report.css.bytes, 160 * 1024);
    assert_eq!(report.js.bytes, 10);
    assert_eq!(report.images.files, 2);
    assert_eq!(report.images.bytes, 50);
}

#[test]
fn js_file_boundary_is_strict() {
    let site = Site::new();
    let budget = usize::try_from(100 * KIB).unwrap();
    site.write("dist/app.js", "a".repeat(budget))
        .write("dist/vendor.js", "b".repeat(budget + 1));

    let report = PerfChecker::from_config(site.root(), &Config::default()).run();

    assert_eq!(report.violations.len(), 1, "{:#?}", report.violations);
    let violation = &report.violations[0];
    assert_eq!(violation.rule, "perf/js-size");
    assert_eq!(violation.file, PathBuf::from("dist/vendor.js"));
    assert_eq!(violation.actual, 100 * KIB + 1);
    assert_eq!(report.js.files, 2);
}

#[test]
fn js_total_image_size_and_page_weight() {
    let site = Site::new();
    let chunk = "j".repeat(90 * 1024);
    for name in ["a", "b", "c", "d"] {
        site.write(&format!("dist/js/{name}.js"), &chunk);
    }
    let image_budget = usize::try_from(500 * KIB).unwrap();
    site.write("dist/img/hero.png", "p".repeat(image_budget + 1));

    let report = PerfChecker::from_config(site.root(), &Config::default()).run();

    let rules: Vec<_> = report.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["perf/js-total", "perf/image-size"]);
    assert_eq!(report.violations[0].file, PathBuf::from("(total)"));
    assert_eq!(report.violations[0].actual, 360 * KIB);
    assert_eq!(report.violations[1].file, PathBuf::from("dist/img/hero.png"));

    site.write("dist/img/team.webp", "w".repeat(200 * 1024));
    let report = PerfChecker::from_config(site.root(), &Config::default()).run();

    let rules: Vec<_> = report.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(
        rules,
        vec!["perf/js-total", "perf/image-size", "perf/total-weight"]
    );
    let total = &report.violations[2];
    assert_eq!(total.file, PathBuf::from("(total)"));
    assert_eq!(total.actual, 1060 * KIB + 1);
    assert_eq!(total.budget, 1024 * KIB);
    assert_eq!(report.total_weight(), 1060 * KIB + 1);
}

// ── consistency ──

#[test]
fn unapproved_stat_is_reported_by_name() {
    let site = Site::new();
    site.write("content/approved/stats.yaml", "clv:\n  value: 3.2x\n")
        .write(
            "src/content/blog/post.md",
            "---\ntitle: x\n---\nRevenue grew {{stat:revenue_growth}} and {{stat:clv}}.\n",
        );

    let report = consistency_checker(site.root(), &Config::default())
        .unwrap()
        .run();

    assert_eq!(report.violations.len(), 1, "{:#?}", report.violations);
    let violation = &report.violations[0];
    assert_eq!(violation.rule, "consistency/stat-citation");
    assert!(violation.message.contains("revenue_growth"));
    assert_eq!(violation.line, 4);
}

#[test]
fn consistency_file_refs_and_rubric() {
    let site = Site::new();
    site.write("src/lib/seo.ts", "export {}\n")
        .write(
            ".specs/plan.md",
            "# Plan\n\nSee `src/lib/seo.ts` and [the form](src/components/Form.tsx).\n",
        )
        .write(".claude/notes.yaml", "entry: https://example.com\n")
        .write("scripts/eval/a11y-check.ts", "function run(): void {}\n\nrun()\n")
        .write("scripts/eval/draft-check.ts", "function check() {}\n")
        .write("scripts/eval/utils.ts", "export function collectFiles() {}\n");

    let report = consistency_checker(site.root(), &Config::default())
        .unwrap()
        .run();

    assert_eq!(report.count_rule("consistency/file-ref"), 1);
    assert_eq!(report.count_rule("consistency/eval-rubric"), 2);
    assert!(report
        .violations
        .iter()
        .filter(|v| v.rule == "consistency/eval-rubric")
        .all(|v| v.file == PathBuf::from("scripts/eval/draft-check.ts")));
    assert_eq!(
        report.notes,
        vec!["No content/approved/stats.yaml found; skipping stat citation check".to_string()]
    );
}

#[test]
fn consistency_reports_follow_check_order() {
    let site = Site::new();
    site.write("content/approved/stats.yaml", "clv:\n  value: 3.2x\n")
        .write(
            "src/content/blog/post.md",
            "---\ntitle: x\n---\nUp {{stat:revenue_growth}}.\n",
        )
        .write(".specs/plan.md", "See `src/lib/missing.ts`.\n")
        .write("scripts/eval/draft-check.ts", "function check() {}\n");

    let report = consistency_checker(site.root(), &Config::default())
        .unwrap()
        .run();

    let groups: Vec<_> = report.by_rule().into_iter().map(|(rule, _)| rule).collect();
    assert_eq!(
        groups,
        vec![
            "consistency/file-ref",
            "consistency/stat-citation",
            "consistency/eval-rubric"
        ]
    );
}

// ── frontmatter ──

const VALID_POST: &str = r"---
title: Five ways to sharpen your funnel
description: A practical look at tightening every stage of the funnel.
author: Sam Rivers
publishedAt: 2024-03-01
category: seo
hero:
  title: Sharpen the funnel
  lead: Small fixes, big wins.
---
Body.
";

#[test]
fn frontmatter_reports_lead_and_category() {
    let site = Site::new();
    site.write("src/content/blog/good.md", VALID_POST).write(
        "src/content/blog/bad.mdx",
        VALID_POST
            .replace("  lead: Small fixes, big wins.\n", "")
            .replace("category: seo", "category: \"bogus\""),
    );

    let report = FrontmatterValidator::from_config(site.root(), &Config::default()).run();

    assert_eq!(report.files_checked(), 2);
    let fields: Vec<_> = report.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["category", "hero.lead"]);
    assert!(report
        .errors
        .iter()
        .all(|e| e.file == PathBuf::from("src/content/blog/bad.mdx")));
}

#[test]
fn frontmatter_missing_header_and_empty_collection() {
    let site = Site::new();
    site.write("src/content/blog/notes.md", "No header here.\n");

    let report = FrontmatterValidator::from_config(site.root(), &Config::default()).run();

    assert_eq!(report.collections.len(), 2);
    assert_eq!(report.collections[0].files, 1);
    assert_eq!(report.collections[1].name, "case-studies");
    assert_eq!(report.collections[1].files, 0);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].field, "frontmatter");
}
