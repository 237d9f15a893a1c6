//! Startup failure modes (spec.md §7 "Startup failure").

use thiserror::Error;

/// Why `LiveScreen::start` declined to start. The only kind today mirrors
/// spec.md §3's lifecycle rule: the width source is probed once at startup
/// regardless of whether the configured width is fixed or "auto", and a
/// missing terminal is a hard stop — callers should fall back to plain
/// writes instead.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("no terminal attached: engine cannot start without a width source")]
    NoTerminal,
}
