//! Engine options and config-file loading.
//!
//! Mirrors the teacher's `core-config`: discover a TOML file in a
//! conventional location (or use an override path), parse what's there, and
//! fall back to in-code defaults on anything missing or malformed rather
//! than erroring out of startup.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

/// Terminal width mode: a fixed column count, or "ask the terminal every
/// tick" (spec.md §3 `terminal_width`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalWidth {
    Auto,
    Fixed(u16),
}

impl Default for TerminalWidth {
    fn default() -> Self {
        Self::Auto
    }
}

/// Options accepted by `live-core::LiveScreen::start` (spec.md §6 `opts`).
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub name: Option<String>,
    pub refresh_every_ms: u64,
    pub terminal_width: TerminalWidth,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            name: None,
            refresh_every_ms: 100,
            terminal_width: TerminalWidth::Auto,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
struct RawEngineConfig {
    #[serde(default)]
    refresh_every_ms: Option<u64>,
    #[serde(default)]
    terminal_width: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    engine: RawEngineConfig,
}

/// Best-effort config path: local working directory first, then the
/// platform config dir, matching `core-config::discover`.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("live_screen.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("live-screen").join("live_screen.toml");
    }
    PathBuf::from("live_screen.toml")
}

/// Loads `EngineOptions` from `path` (or the discovered default location).
/// A missing or malformed file yields `EngineOptions::default()` rather than
/// an error — config problems should never keep the engine from starting.
pub fn load_from(path: Option<PathBuf>) -> Result<EngineOptions> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(EngineOptions::default());
    };

    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            let defaults = EngineOptions::default();
            let refresh_every_ms = file.engine.refresh_every_ms.unwrap_or(defaults.refresh_every_ms);
            let terminal_width = match file.engine.terminal_width {
                Some(0) | None => defaults.terminal_width,
                Some(cols) => TerminalWidth::Fixed(cols),
            };
            info!(
                target: "live_screen.config",
                path = %path.display(),
                refresh_every_ms,
                "config_loaded"
            );
            Ok(EngineOptions {
                name: None,
                refresh_every_ms,
                terminal_width,
            })
        }
        Err(e) => {
            tracing::warn!(
                target: "live_screen.config",
                path = %path.display(),
                error = %e,
                "config_parse_failed_using_defaults"
            );
            Ok(EngineOptions::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_when_file_missing() {
        let opts = load_from(Some(PathBuf::from("__nonexistent_live_screen__.toml"))).unwrap();
        assert_eq!(opts.refresh_every_ms, 100);
        assert_eq!(opts.terminal_width, TerminalWidth::Auto);
    }

    #[test]
    fn parses_refresh_and_width() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[engine]\nrefresh_every_ms = 250\nterminal_width = 120\n",
        )
        .unwrap();
        let opts = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(opts.refresh_every_ms, 250);
        assert_eq!(opts.terminal_width, TerminalWidth::Fixed(120));
    }

    #[test]
    fn zero_width_falls_back_to_auto() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[engine]\nterminal_width = 0\n").unwrap();
        let opts = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(opts.terminal_width, TerminalWidth::Auto);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "not valid toml [[[").unwrap();
        let opts = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(opts.refresh_every_ms, 100);
    }

    #[test]
    fn logs_on_successful_load() {
        use std::io::Write;
        use std::sync::{Arc, Mutex, MutexGuard};
        use tracing::subscriber::with_default;
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone)]
        struct BufferWriter {
            inner: Arc<Mutex<Vec<u8>>>,
        }
        struct LockedWriter<'a> {
            guard: MutexGuard<'a, Vec<u8>>,
        }
        impl<'a> Write for LockedWriter<'a> {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.guard.extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        impl<'a> MakeWriter<'a> for BufferWriter {
            type Writer = LockedWriter<'a>;
            fn make_writer(&'a self) -> Self::Writer {
                LockedWriter {
                    guard: self.inner.lock().expect("log buffer poisoned"),
                }
            }
        }

        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = BufferWriter { inner: buf.clone() };
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[engine]\nrefresh_every_ms = 50\n").unwrap();

        with_default(subscriber, || {
            load_from(Some(tmp.path().to_path_buf())).unwrap();
        });

        let log_output = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("config_loaded"));
    }
}
