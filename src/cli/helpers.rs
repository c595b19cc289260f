//! Shared helper functions for CLI commands

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Display placeholder for test fields that were never recorded.
pub fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Display placeholder for empty comment fields.
pub fn or_no_comment(value: &str) -> &str {
    if value.is_empty() {
        "No recorded comment."
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(or_na(""), "N/A");
        assert_eq!(or_na("1.48"), "1.48");
        assert_eq!(or_no_comment(""), "No recorded comment.");
        assert_eq!(or_no_comment("rework pending"), "rework pending");
    }
}
