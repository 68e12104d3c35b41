//! Tweet length validation.
//!
//! Twitter counts every link as a fixed-size shortened t.co URL, so the length
//! that matters is the *relative* length: the character count with each link
//! replaced by [`SHORT_URL_LENGTH`] characters.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum relative length of a postable tweet.
pub const MAX_TWEET_LENGTH: i64 = 140;

/// Weight of a single link after Twitter's link shortening.
pub const SHORT_URL_LENGTH: i64 = 23;

/// Hard limit Twitter itself enforces on status updates.
pub const PLATFORM_CHARACTER_LIMIT: i64 = 280;

const URL_PATTERN: &str = r"https?://\S*";

/// Link regex, compiled once
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("Invalid URL regex pattern"))
}

/// Computes the relative length of a tweet text.
///
/// The text is trimmed first. Every `http://` or `https://` link (up to the
/// next whitespace) counts as [`SHORT_URL_LENGTH`] characters regardless of
/// its literal length.
///
/// # Example
///
/// ```rust
/// use zazu::tweet::relative_length;
///
/// assert_eq!(relative_length("hello"), 5);
/// assert_eq!(relative_length("see https://example.com/a/very/long/path"), 4 + 23);
/// ```
pub fn relative_length(text: &str) -> i64 {
    let text = text.trim();
    let literal = text.chars().count() as i64;

    let adjustment: i64 = url_regex()
        .find_iter(text)
        .map(|m| SHORT_URL_LENGTH - m.as_str().chars().count() as i64)
        .sum();

    literal + adjustment
}

/// Returns `true` if the text can be posted: its relative length is greater
/// than zero and at most [`MAX_TWEET_LENGTH`].
///
/// # Example
///
/// ```rust
/// use zazu::is_valid_tweet;
///
/// assert!(is_valid_tweet("Hoi dit is een test"));
/// assert!(!is_valid_tweet(""));
/// ```
pub fn is_valid_tweet(text: &str) -> bool {
    let length = relative_length(text);
    length > 0 && length <= MAX_TWEET_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIKI_LINK: &str = "https://en.wikipedia.org/wiki/Python_(programming_language ";

    #[test]
    fn test_short_text_is_valid() {
        assert!(is_valid_tweet("Hoi dit is een test"));
    }

    #[test]
    fn test_long_text_is_invalid() {
        let text = "LONG ".repeat(100) + "TWEET";
        assert!(!is_valid_tweet(&text));
    }

    #[test]
    fn test_empty_and_whitespace_are_invalid() {
        assert!(!is_valid_tweet(""));
        assert!(!is_valid_tweet("   \t "));
        assert_eq!(relative_length(""), 0);
    }

    #[test]
    fn test_boundary_lengths() {
        assert!(is_valid_tweet(&"a".repeat(140)));
        assert!(!is_valid_tweet(&"a".repeat(141)));
        assert!(is_valid_tweet("a"));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let text = format!("  {}\n", "a".repeat(140));
        assert_eq!(relative_length(&text), 140);
        assert!(is_valid_tweet(&text));
    }

    #[test]
    fn test_links_count_as_short_urls() {
        // Five links: 5 * 23 + 4 separating spaces
        let five = WIKI_LINK.repeat(5);
        assert_eq!(relative_length(&five), 5 * 23 + 4);
        assert!(is_valid_tweet(&five));

        // Seven links: 7 * 23 + 6 = 167
        let seven = WIKI_LINK.repeat(7);
        assert_eq!(relative_length(&seven), 167);
        assert!(!is_valid_tweet(&seven));
    }

    #[test]
    fn test_each_link_contributes_independently() {
        let text = "a http://x.io b https://example.org/some/long/path/that/keeps/going";
        // "a " + link + " b " + link
        assert_eq!(relative_length(text), 2 + 23 + 3 + 23);
    }

    #[test]
    fn test_url_regex_matches_whole_link() {
        let found: Vec<&str> = url_regex()
            .find_iter("go to https://a.b/c?d=1 and http://x.y")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["https://a.b/c?d=1", "http://x.y"]);
    }

    #[test]
    fn test_bare_scheme_counts_as_link() {
        assert_eq!(relative_length("http://"), 23);
        assert_eq!(relative_length("ftp://example.org"), 17);
    }

    #[test]
    fn test_long_link_does_not_make_tweet_invalid() {
        let text = format!("{} https://example.org/{}", "a".repeat(100), "p".repeat(300));
        assert_eq!(relative_length(&text), 100 + 1 + 23);
        assert!(is_valid_tweet(&text));
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        let text = "é".repeat(140);
        assert_eq!(relative_length(&text), 140);
        assert!(is_valid_tweet(&text));
        assert!(!is_valid_tweet(&"€".repeat(141)));
    }
}
