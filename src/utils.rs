//! Small text helpers used by the scrapers and for logging.
//!
//! - Log truncation that respects UTF-8 character boundaries
//! - Text extraction from HTML elements with per-node trimming
//! - Removal of the listing-only path segment from article URLs

use itertools::Itertools;
use scraper::ElementRef;

/// Truncate a string for logging purposes.
///
/// Keeps at most `max` characters and appends an ellipsis with the number of
/// bytes dropped. Article text is mostly Cyrillic, so the cut is made on a
/// character boundary rather than a byte offset.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("привет", 2), "пр…(+8 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Text content of an element with every text node trimmed and empty nodes
/// dropped, concatenated without separators.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Join the text of several elements with single spaces.
pub fn join_texts<'a>(elements: impl IntoIterator<Item = ElementRef<'a>>) -> String {
    elements.into_iter().map(element_text).join(" ")
}

/// Remove every occurrence of a `/segment/` path component, keeping the
/// surrounding slashes collapsed to one.
///
/// ```ignore
/// assert_eq!(strip_path_segment("https://x/a/day/b", "day"), "https://x/a/b");
/// ```
pub fn strip_path_segment(url: &str, segment: &str) -> String {
    url.replace(&format!("/{segment}/"), "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("привет", 2), "пр…(+8 bytes)");
        assert_eq!(truncate_for_log("привет", 6), "привет");
    }

    #[test]
    fn test_element_text_trims_each_node() {
        let html = Html::parse_fragment("<p>  Первый <b> абзац </b>\n текст. </p>");
        let sel = Selector::parse("p").unwrap();
        let p = html.select(&sel).next().unwrap();
        assert_eq!(element_text(p), "Первыйабзацтекст.");
    }

    #[test]
    fn test_join_texts_uses_single_spaces() {
        let html = Html::parse_fragment("<p> One. </p><p>Two.</p><p>\n</p><p>Three.</p>");
        let sel = Selector::parse("p").unwrap();
        assert_eq!(join_texts(html.select(&sel)), "One. Two.  Three.");
    }

    #[test]
    fn test_join_texts_empty() {
        let html = Html::parse_fragment("<div></div>");
        let sel = Selector::parse("p").unwrap();
        assert_eq!(join_texts(html.select(&sel)), "");
    }

    #[test]
    fn test_strip_path_segment() {
        assert_eq!(
            strip_path_segment("https://www.kommersant.ru/archive/rubric/2/day/x/1", "day"),
            "https://www.kommersant.ru/archive/rubric/2/x/1"
        );
        assert_eq!(
            strip_path_segment("https://www.kommersant.ru/doc/123", "day"),
            "https://www.kommersant.ru/doc/123"
        );
        assert_eq!(
            strip_path_segment("https://www.kommersant.ru/today/1", "day"),
            "https://www.kommersant.ru/today/1"
        );
    }
}
