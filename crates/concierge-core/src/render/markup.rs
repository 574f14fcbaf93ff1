//! Text-to-markup transform for message blocks.
//!
//! Markup-significant characters are escaped before line breaks are
//! converted, so text from the endpoint or the catalog can never inject
//! elements into the widget.

/// Markup for a paragraph break (a blank line in the source text).
pub const PARAGRAPH_BREAK: &str = "<br><br>";

/// Markup for a single line break.
pub const LINE_BREAK: &str = "<br>";

/// Escape `&`, `<`, `>`, `"` and `'`.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Convert turn text into block markup.
///
/// `\r\n` is normalized first. Each `\n\n` becomes a paragraph break, then any
/// remaining `\n` becomes a line break. Nothing else is transformed.
pub fn format_markup(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    escape_markup(&normalized)
        .replace("\n\n", PARAGRAPH_BREAK)
        .replace('\n', LINE_BREAK)
}
