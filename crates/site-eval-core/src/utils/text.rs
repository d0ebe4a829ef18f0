//! Text helpers shared by the line-oriented rules.

/// Maximum number of characters kept in a violation snippet.
pub const SNIPPET_MAX_CHARS: usize = 120;

/// Truncates `text` to at most [`SNIPPET_MAX_CHARS`] characters.
#[must_use]
pub fn truncate_snippet(text: &str) -> String {
    text.chars().take(SNIPPET_MAX_CHARS).collect()
}

/// Returns the 1-indexed line containing `offset` in `content`.
///
/// Offsets past the end map to the last line.
#[must_use]
pub fn line_at_offset(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Formats a byte count as `B`, `KB` (one decimal) or `MB` (two decimals).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes < KIB {
        format!("{bytes}B")
    } else if bytes < MIB {
        format!("{:.1}KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2}MB", bytes as f64 / MIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_keeps_short_text() {
        assert_eq!(truncate_snippet("<img src=\"a\">"), "<img src=\"a\">");
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let text = "é".repeat(200);
        let snippet = truncate_snippet(&text);
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
    }

    #[test]
    fn line_at_offset_counts_newlines() {
        let content = "a\nbb\nccc";
        assert_eq!(line_at_offset(content, 0), 1);
        assert_eq!(line_at_offset(content, 2), 2);
        assert_eq!(line_at_offset(content, 5), 3);
        assert_eq!(line_at_offset(content, 999), 3);
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(1536), "1.5KB");
        assert_eq!(format_bytes(100 * 1024), "100.0KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00MB");
    }
}
