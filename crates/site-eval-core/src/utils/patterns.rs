//! Compiled pattern helpers.

use regex::Regex;

/// Compiles a literal pattern for use in a `LazyLock` static.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regex. Only call this with string
/// literals covered by the crate's tests.
#[must_use]
#[allow(clippy::expect_used)]
pub fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern must be a valid regex")
}

/// Returns true if `haystack` contains `needle`, ignoring ASCII case.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
