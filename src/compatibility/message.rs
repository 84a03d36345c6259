//! Human-facing message normalization

/// Longest message kept before truncation, in characters
pub const MAX_MESSAGE_CHARS: usize = 100;

const EMPTY_MESSAGE: &str = "None";

/// Never empty; longer than [`MAX_MESSAGE_CHARS`] is cut and suffixed with `...`
pub fn normalize_message(message: &str) -> String {
    if message.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    if message.chars().count() > MAX_MESSAGE_CHARS {
        let mut truncated: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
        truncated.push_str("...");
        return truncated;
    }

    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_becomes_none() {
        assert_eq!(normalize_message(""), "None");
    }

    #[test]
    fn test_long_message_truncated() {
        let message = "a".repeat(105);
        let normalized = normalize_message(&message);
        assert_eq!(normalized.len(), 103);
        assert!(normalized.ends_with("..."));
        assert!(normalized.starts_with(&"a".repeat(100)));
    }

    #[test]
    fn test_boundary_is_kept() {
        let message = "b".repeat(100);
        assert_eq!(normalize_message(&message), message);
    }

    #[test]
    fn test_multibyte_truncates_on_char_boundary() {
        let message = "é".repeat(120);
        let normalized = normalize_message(&message);
        assert_eq!(normalized.chars().count(), 103);
        assert!(normalized.ends_with("..."));
    }

    #[test]
    fn test_short_message_untouched() {
        assert_eq!(normalize_message("Subject not found"), "Subject not found");
    }
}
