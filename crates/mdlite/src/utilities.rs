//! Utility functions shared by the block parser and the inline renderer.

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Normalize line endings to LF, expand tabs, and trim trailing whitespace
/// from the end of the document.
pub fn normalize_document(document: &str, tab_width: usize) -> String {
    let tab = " ".repeat(tab_width);
    let mut result = String::with_capacity(document.len());
    let mut chars = document.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push('\n');
            }
            '\t' => result.push_str(&tab),
            _ => result.push(c),
        }
    }

    let trimmed_len = result.trim_end().len();
    result.truncate(trimmed_len);
    result
}

/// Collapse every whitespace run into a single space and trim both ends
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.trim().chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}
