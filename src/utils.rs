//! Small string helpers shared by the parser and the logging paths.

use itertools::Itertools;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to the nearest
/// character boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Whitespace as HTML text normalisation sees it: space, tab, line feed,
/// form feed, carriage return and no-break space.
///
/// Narrower than Unicode `White_Space`; U+0085 (Latin-1 byte 0x85) is text.
pub fn is_markup_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r' | '\u{a0}')
}

/// Collapse every whitespace run into a single space and trim both ends.
///
/// Element text is compared and reported the way a browser would render it,
/// so line breaks and indentation inside the index markup disappear.
pub fn normalize_text<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let raw: String = fragments.into_iter().collect();
    raw.split(is_markup_whitespace)
        .filter(|word| !word.is_empty())
        .join(" ")
}
