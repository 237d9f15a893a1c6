//! Minimal box formatter: right-pads content to a fixed rectangle.
//!
//! This stands in for the "box formatter" collaborator described in the
//! external interfaces: `{min_width, min_height, border_style = none}`.
//! `border_style` is accepted for shape parity with that interface but the
//! engine never requests anything other than `None` — borders are a
//! presentation concern for callers, not the differential renderer.

use crate::width::visible_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
}

impl Default for BorderStyle {
    fn default() -> Self {
        BorderStyle::None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoxOptions {
    pub min_width: usize,
    pub min_height: usize,
    pub border_style: BorderStyle,
}

impl BoxOptions {
    pub fn new(min_width: usize, min_height: usize) -> Self {
        Self {
            min_width,
            min_height,
            border_style: BorderStyle::None,
        }
    }
}

/// Pads `content` to exactly `opts.min_height` rows of `opts.min_width`
/// visible columns, appending blank filler lines to the bottom when the
/// content is shorter. Used by the renderer's Phase B to repaint a shrunk
/// block without leaving stale characters from its previous, taller draw.
pub fn render_box(content: &str, opts: BoxOptions) -> String {
    let mut lines: Vec<String> = if content.is_empty() {
        vec![String::new()]
    } else {
        content.split('\n').map(str::to_string).collect()
    };

    for line in lines.iter_mut() {
        let w = visible_width(line);
        if w < opts.min_width {
            line.extend(std::iter::repeat_n(' ', opts.min_width - w));
        }
    }

    while lines.len() < opts.min_height {
        lines.push(" ".repeat(opts.min_width));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_bottom_with_blank_lines() {
        let out = render_box("only", BoxOptions::new(6, 3));
        assert_eq!(out, "only  \n      \n      ");
    }

    #[test]
    fn does_not_truncate_when_already_tall_enough() {
        let out = render_box("a\nb", BoxOptions::new(2, 1));
        assert_eq!(out, "a \nb ");
    }
}
