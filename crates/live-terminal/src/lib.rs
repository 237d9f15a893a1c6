//! Terminal collaborator: width probing and raw output.
//!
//! The engine never emulates a terminal and never reads from one — it only
//! asks for the current column count and writes one composite byte string
//! per tick. Both operations are behind [`TerminalBackend`] so the
//! differential renderer and actor can be tested without a real tty.

use std::io::{self, Write, stdout};

/// Collaborator interface consumed (never implemented) by the renderer:
/// `terminal_columns()` and `terminal_write(bytes)` from spec §6.
pub trait TerminalBackend: Send {
    /// Current terminal column count, or `None` if no terminal is attached
    /// (e.g. stdout redirected to a file/pipe).
    fn terminal_columns(&self) -> Option<u16>;

    /// Writes `bytes` in a single call. Implementations must not partially
    /// buffer across calls — one call here is one terminal write.
    fn terminal_write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Real terminal backed by `crossterm`/stdout.
#[derive(Default)]
pub struct CrosstermBackend;

impl CrosstermBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TerminalBackend for CrosstermBackend {
    fn terminal_columns(&self) -> Option<u16> {
        crossterm::terminal::size().ok().map(|(cols, _rows)| cols)
    }

    fn terminal_write(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut out = stdout();
        out.write_all(bytes).inspect_err(|err| {
            tracing::error!(target: "live_screen.terminal", ?err, "stdout_write_failed");
        })?;
        out.flush()
    }
}

/// In-memory backend used by unit/property tests: records every write
/// verbatim and reports a fixed, settable column count.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub columns: Option<u16>,
    pub writes: Vec<Vec<u8>>,
}

impl RecordingBackend {
    pub fn new(columns: u16) -> Self {
        Self {
            columns: Some(columns),
            writes: Vec::new(),
        }
    }

    /// Simulates a terminal that reports no columns (used for startup
    /// failure tests).
    pub fn no_terminal() -> Self {
        Self {
            columns: None,
            writes: Vec::new(),
        }
    }

    /// Concatenation of every write observed so far, in order.
    pub fn all_bytes(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

impl TerminalBackend for RecordingBackend {
    fn terminal_columns(&self) -> Option<u16> {
        self.columns
    }

    fn terminal_write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_backend_concatenates_in_order() {
        let mut b = RecordingBackend::new(80);
        b.terminal_write(b"a").unwrap();
        b.terminal_write(b"b").unwrap();
        assert_eq!(b.all_bytes(), b"ab");
    }

    #[test]
    fn no_terminal_reports_none_columns() {
        let b = RecordingBackend::no_terminal();
        assert_eq!(b.terminal_columns(), None);
    }
}
