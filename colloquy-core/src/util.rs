//! Utility functions for colloquy

/// Empty or whitespace only
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Truncates a string for logging, keeping utf8 character boundaries and noting the original
/// length in characters.
///
/// # Example
///
/// ```
/// # use colloquy_core::util::truncate_for_log;
/// assert_eq!(truncate_for_log("🦀🦀🦀🦀", 2), "🦀🦀... (4 chars)");
/// assert_eq!(truncate_for_log("short", 10), "short");
/// ```
pub fn truncate_for_log(s: impl AsRef<str>, max_chars: usize) -> String {
    let s = s.as_ref();
    let total = s.chars().count();

    if total <= max_chars {
        return s.to_string();
    }

    let truncated = s.chars().take(max_chars).collect::<String>();
    format!("{truncated}... ({total} chars)")
}
