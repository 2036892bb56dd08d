//! Greedy word wrap over a fixed character budget.
//!
//! Widths are counted in `char`s, not bytes or glyph metrics. Whitespace runs
//! (spaces, tabs, newlines) collapse to a single separator between words.

/// Line width used when callers have no preference.
pub const DEFAULT_WRAP_WIDTH: usize = 90;

/// Wraps `text` into lines of at most `max_width` characters.
///
/// Words are never split: a word longer than `max_width` gets a line of its own
/// and is emitted whole. Empty or all-whitespace input yields no lines.
/// A `max_width` of zero means no preference and wraps at `DEFAULT_WRAP_WIDTH`.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = if max_width == 0 {
        DEFAULT_WRAP_WIDTH
    } else {
        max_width
    };
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
