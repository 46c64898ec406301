//! String utility functions for text processing

/// Shorten `s` to at most `max_chars` characters, appending `...` when cut.
///
/// Works on characters rather than bytes so multi-byte labels are never split.
pub fn truncate_excerpt(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Returns the trimmed value, or `None` when nothing is left.
pub fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_excerpt() {
        assert_eq!(truncate_excerpt("short", 60), "short");
        assert_eq!(truncate_excerpt("abcdef", 3), "abc...");
        assert_eq!(truncate_excerpt("🇮🇷🇮🇷🇮🇷", 2), "🇮🇷...");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  x "), Some("x".to_string()));
        assert_eq!(non_empty("   "), None);
    }
}
