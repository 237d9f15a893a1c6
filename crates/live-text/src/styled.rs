//! Styled data: text with interleaved ANSI styling metadata, represented as
//! a small recursive tree rather than a flat byte string, per the collaborator
//! interface described for callers that build up content incrementally
//! (block render functions, `put_chars` producers).

/// A raw SGR style, stored as the parameter string of a `\x1b[<params>m`
/// sequence (e.g. `"1;32"` for bold green). Styling itself is treated as an
/// external collaborator concern — this type exists only so styled content
/// can be composed and flattened to a plain ANSI string before it reaches
/// the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style(pub String);

impl Style {
    pub fn new(params: impl Into<String>) -> Self {
        Self(params.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyledData {
    Plain(String),
    Styled(String, Style),
    Concat(Vec<StyledData>),
}

impl StyledData {
    pub fn plain(s: impl Into<String>) -> Self {
        StyledData::Plain(s.into())
    }

    pub fn styled(s: impl Into<String>, style: Style) -> Self {
        StyledData::Styled(s.into(), style)
    }

    pub fn concat(parts: Vec<StyledData>) -> Self {
        StyledData::Concat(parts)
    }

    /// Flattens the tree into one ANSI-embedded string: `unlines` of the
    /// tree's own internal structure.
    pub fn into_ansi_string(self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        match self {
            StyledData::Plain(s) => out.push_str(s),
            StyledData::Styled(s, style) => {
                out.push_str("\x1b[");
                out.push_str(&style.0);
                out.push('m');
                out.push_str(s);
                out.push_str("\x1b[0m");
            }
            StyledData::Concat(parts) => {
                for p in parts {
                    p.write_into(out);
                }
            }
        }
    }

    /// Splits on explicit newlines, each element being the styled content of
    /// one logical line (style boundaries are not reconstructed across
    /// lines; each line is re-flattened independently).
    pub fn lines(&self) -> Vec<StyledData> {
        self.clone()
            .into_ansi_string()
            .split('\n')
            .map(|l| StyledData::Plain(l.to_string()))
            .collect()
    }

    /// Width-bounded chunking (delegates to the flat-string chunker in
    /// [`crate::chunk`]) — returns a sequence of the same variant.
    pub fn chunk_every(&self, width: usize) -> Vec<StyledData> {
        let flat = self.clone().into_ansi_string();
        let (joined, _) = crate::chunk::render_block(&flat, width);
        joined
            .split('\n')
            .map(|l| StyledData::Plain(l.to_string()))
            .collect()
    }

    /// Rejoins a sequence of styled lines with newlines, mirroring `unlines`.
    pub fn unlines(parts: &[StyledData]) -> StyledData {
        let joined = parts
            .iter()
            .map(|p| p.clone().into_ansi_string())
            .collect::<Vec<_>>()
            .join("\n");
        StyledData::Plain(joined)
    }
}

impl From<&str> for StyledData {
    fn from(s: &str) -> Self {
        StyledData::Plain(s.to_string())
    }
}

impl From<String> for StyledData {
    fn from(s: String) -> Self {
        StyledData::Plain(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_flattens_to_itself() {
        assert_eq!(StyledData::plain("hi").into_ansi_string(), "hi");
    }

    #[test]
    fn styled_wraps_with_sgr_and_reset() {
        let s = StyledData::styled("hi", Style::new("1;32"));
        assert_eq!(s.into_ansi_string(), "\x1b[1;32mhi\x1b[0m");
    }

    #[test]
    fn concat_flattens_children_in_order() {
        let s = StyledData::concat(vec![
            StyledData::plain("a"),
            StyledData::styled("b", Style::new("1")),
            StyledData::plain("c"),
        ]);
        assert_eq!(s.into_ansi_string(), "a\x1b[1mb\x1b[0mc");
    }

    #[test]
    fn unlines_roundtrips_lines() {
        let parts = vec![StyledData::plain("a"), StyledData::plain("b")];
        assert_eq!(StyledData::unlines(&parts).into_ansi_string(), "a\nb");
    }
}
