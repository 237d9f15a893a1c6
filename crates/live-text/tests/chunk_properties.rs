//! Property tests for the width-chunking invariants spec.md §4.2 calls out:
//! no chunk ever exceeds the requested visible width, and an escape sequence
//! is never split across a chunk boundary.

use live_text::{ansi, render_block, visible_width};
use proptest::prelude::*;

/// ASCII text interspersed with a handful of real CSI sequences, so
/// generated lines exercise the escape-aware scanner without just being
/// plain text.
fn styled_line() -> impl Strategy<Value = String> {
    let plain = "[a-zA-Z0-9 ]{0,10}";
    let escapes = prop_oneof![
        Just("\x1b[1m".to_string()),
        Just("\x1b[0m".to_string()),
        Just("\x1b[32m".to_string()),
        Just("\x1b[2K".to_string()),
    ];
    prop::collection::vec(prop_oneof![plain.prop_map(String::from), escapes], 0..6)
        .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// No emitted chunk (line between `\n`s) exceeds `width` visible columns.
    #[test]
    fn chunks_never_exceed_requested_width(line in styled_line(), width in 1usize..20) {
        let (joined, _) = render_block(&line, width);
        for chunk in joined.split('\n') {
            prop_assert!(visible_width(chunk) <= width);
        }
    }

    /// Every escape sequence present in the input survives intact in the
    /// output — chunking never truncates or splits one.
    #[test]
    fn escape_sequences_survive_chunking_intact(line in styled_line(), width in 1usize..20) {
        let input_escapes: Vec<&str> = ansi::spans(&line)
            .into_iter()
            .filter(|(_, is_escape)| *is_escape)
            .map(|(text, _)| text)
            .collect();
        let (joined, _) = render_block(&line, width);
        let output_escapes: Vec<&str> = ansi::spans(&joined)
            .into_iter()
            .filter(|(_, is_escape)| *is_escape)
            .map(|(text, _)| text)
            .collect();
        prop_assert_eq!(input_escapes, output_escapes);
    }

    /// Concatenating all chunks' visible text (escapes stripped) reproduces
    /// the input's visible text verbatim — chunking never drops or
    /// reorders characters.
    #[test]
    fn chunking_preserves_visible_text(line in styled_line(), width in 1usize..20) {
        // `joined` has `\n` chunk separators that `line` never had (the
        // input strategy contains no newlines), so they must be dropped
        // alongside escape sequences before comparing visible text.
        let strip = |s: &str| -> String {
            ansi::spans(s)
                .into_iter()
                .filter(|(_, is_escape)| !is_escape)
                .map(|(text, _)| text)
                .collect::<String>()
                .replace('\n', "")
        };
        let (joined, _) = render_block(&line, width);
        prop_assert_eq!(strip(&joined), strip(&line));
    }
}
