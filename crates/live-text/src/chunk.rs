//! Line splitting, width-bounded chunking, and right-padding (C1 core ops).

use crate::ansi;
use crate::width::visible_width;
use unicode_width::UnicodeWidthChar;

/// Splits a single (already newline-free) line into chunks no wider than
/// `width` visible columns. Escape sequences straddling what would be a
/// chunk boundary stay attached to the chunk that follows them rather than
/// being split or left behind.
fn chunk_line(line: &str, width: usize) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    let mut result = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    // Escapes are held here until a visible char actually follows them, so a
    // boundary-crossing escape sticks to the chunk it opens rather than the
    // one it closes. If the line ends with no visible char left to pull them
    // forward, they fall back onto the already-full current chunk instead of
    // spawning a spurious zero-width trailing chunk.
    let mut pending_escapes = String::new();

    for (text, is_escape) in ansi::spans(line) {
        if is_escape {
            pending_escapes.push_str(text);
            continue;
        }
        for ch in text.chars() {
            if current_width >= width {
                result.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push_str(&pending_escapes);
            pending_escapes.clear();
            current.push(ch);
            current_width += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    current.push_str(&pending_escapes);
    if !current.is_empty() || result.is_empty() {
        result.push(current);
    }
    result
}

/// Splits `content` on explicit line breaks, then width-chunks each
/// resulting line. Returns the rejoined multi-line text and the final line
/// count. Empty content yields one empty line (height 1).
pub fn render_block(content: &str, width: usize) -> (String, usize) {
    let width = width.max(1);
    let lines: Vec<&str> = if content.is_empty() {
        vec![""]
    } else {
        content.split('\n').collect()
    };
    let mut out_lines: Vec<String> = Vec::new();
    for line in lines {
        out_lines.extend(chunk_line(line, width));
    }
    let height = out_lines.len();
    (out_lines.join("\n"), height)
}

/// Right-pads each `\n`-terminated line in `bytes` with spaces up to `width`
/// visible columns, so the redraw beneath it erases stale characters from
/// whatever was painted there before. A trailing, unterminated partial line
/// (including an empty one produced by a final `\n`) is padded too but never
/// gains a newline that was not already present — this preserves the exact
/// line count of the input instead of inventing an extra blank row.
pub fn pad_to_width(bytes: &[u8], width: usize) -> Vec<u8> {
    let width = width.max(1);
    let text = String::from_utf8_lossy(bytes);
    let mut out = String::with_capacity(text.len());
    let mut rest: &str = text.as_ref();
    while let Some(idx) = rest.find('\n') {
        let line = &rest[..idx];
        out.push_str(line);
        pad_line(&mut out, line, width);
        out.push('\n');
        rest = &rest[idx + 1..];
    }
    if !rest.is_empty() {
        out.push_str(rest);
        pad_line(&mut out, rest, width);
    }
    out.into_bytes()
}

fn pad_line(out: &mut String, line: &str, width: usize) {
    let w = visible_width(line);
    if w < width {
        out.extend(std::iter::repeat_n(' ', width - w));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_yields_one_empty_line() {
        let (text, h) = render_block("", 10);
        assert_eq!(text, "");
        assert_eq!(h, 1);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let (text, h) = render_block("abcdef", 3);
        assert_eq!(text, "abc\ndef");
        assert_eq!(h, 2);
    }

    #[test]
    fn short_line_is_one_chunk() {
        let (text, h) = render_block("hi", 10);
        assert_eq!(text, "hi");
        assert_eq!(h, 1);
    }

    #[test]
    fn explicit_newlines_become_separate_heights() {
        let (text, h) = render_block("line1\nline2", 50);
        assert_eq!(text, "line1\nline2");
        assert_eq!(h, 2);
    }

    #[test]
    fn escape_sequence_stays_attached_to_following_chunk() {
        // width 3: "ab" fills to width 2, then styled "c" would cross the
        // boundary before the escape; escape sticks to the chunk it opens.
        let line = "ab\x1b[1mc";
        let chunks = chunk_line(line, 2);
        assert_eq!(chunks, vec!["ab".to_string(), "\x1b[1mc".to_string()]);
    }

    #[test]
    fn trailing_escape_at_exact_width_does_not_spawn_a_blank_chunk() {
        // width 2: "ab" exactly fills the chunk; the trailing reset has no
        // visible char left to pull it into a new chunk, so it stays put.
        let (text, h) = render_block("ab\x1b[0m", 2);
        assert_eq!(text, "ab\x1b[0m");
        assert_eq!(h, 1);
    }

    #[test]
    fn pad_right_pads_each_line_to_width() {
        let out = pad_to_width(b"hi\nworld", 5);
        assert_eq!(String::from_utf8(out).unwrap(), "hi   \nworld");
    }

    #[test]
    fn pad_ignores_escape_sequence_width() {
        let out = pad_to_width(b"\x1b[32mhi\x1b[0m", 5);
        let s = String::from_utf8(out).unwrap();
        assert_eq!(s, "\x1b[32mhi\x1b[0m   ");
    }
}
