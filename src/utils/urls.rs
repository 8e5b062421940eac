//! URL detection in message text

use once_cell::sync::Lazy;
use regex::Regex;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("Invalid regex pattern"));

/// Every `http://` or `https://` token in `text`, in order of appearance
///
/// A token runs until the next whitespace character.
pub fn detect_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True if `text` contains at least one URL
pub fn contains_url(text: &str) -> bool {
    URL_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_urls_in_order() {
        assert_eq!(
            detect_urls("see http://a.com and https://b.org/x"),
            vec!["http://a.com", "https://b.org/x"]
        );
    }

    #[test]
    fn test_detect_urls_none() {
        assert!(detect_urls("no links").is_empty());
        assert!(detect_urls("").is_empty());
        assert!(!contains_url("ftp://files.example.com"));
    }

    #[test]
    fn test_detect_urls_stops_at_whitespace() {
        assert_eq!(
            detect_urls("docs:\thttps://example.com/a?b=1#c\nnext line"),
            vec!["https://example.com/a?b=1#c"]
        );
    }

    #[test]
    fn test_detect_urls_keeps_trailing_punctuation() {
        // Tokens end at whitespace only
        assert_eq!(
            detect_urls("visit https://example.com."),
            vec!["https://example.com."]
        );
        assert!(contains_url("visit https://example.com."));
    }
}
