//! HTML entity escaping.

/// Escapes the five HTML-significant characters with their named entities.
///
/// Total replacement, not context-aware: the same escaping is applied
/// whether the text lands in element content or an attribute value. This
/// is deliberately not a general HTML sanitizer; untrusted markup must
/// never be passed through expecting it to survive.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
