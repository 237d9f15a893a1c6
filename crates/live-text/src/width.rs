//! Visible-width measurement.
//!
//! Per the engine's non-goals, we do not attempt grapheme-cluster-aware
//! measurement (no combining marks, ZWJ, skin tone modifiers, etc.) — just
//! a fixed per-`char` width via `unicode-width`, with ANSI escape sequences
//! contributing zero regardless of their content.

use crate::ansi;
use unicode_width::UnicodeWidthChar;

/// Visible width of `s` in terminal columns, ignoring embedded ANSI escapes.
pub fn visible_width(s: &str) -> usize {
    ansi::spans(s)
        .into_iter()
        .filter(|(_, is_escape)| !is_escape)
        .map(|(text, _)| text.chars().map(|c| UnicodeWidthChar::width(c).unwrap_or(0)).sum::<usize>())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_is_char_count() {
        assert_eq!(visible_width("hello"), 5);
    }

    #[test]
    fn escape_sequences_contribute_zero() {
        assert_eq!(visible_width("\x1b[1mhello\x1b[0m"), 5);
    }

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(visible_width(""), 0);
    }
}
