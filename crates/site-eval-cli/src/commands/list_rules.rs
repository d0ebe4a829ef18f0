//! List rules command implementation.

use site_eval_rules::{catalog, Suite};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<12} {:<30} Description", "Suite", "Rule");
    println!("{}", "-".repeat(96));

    for rule in catalog() {
        println!(
            "{:<12} {:<30} {}",
            rule.suite.name(),
            rule.name,
            rule.description
        );
    }

    println!("\nSuites:");
    for suite in Suite::ALL {
        println!("  {:<12} - {}", suite.name(), suite.title());
    }

    println!("\nRun one suite per invocation, e.g.:");
    println!("  site-eval a11y");
    println!("  site-eval --root ./site perf --format json");
}
