//! Demo binary: wires `live-core`'s engine to a real terminal, logging, and
//! a CLI, and drives a handful of sticky progress blocks to show the engine
//! off end to end. Mirrors the teacher's `ox-bin` entrypoint shape
//! (`configure_logging` + `install_panic_hook` + a small startup struct)
//! without the editor-specific pieces.

use std::io::Write as _;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use live_config::EngineOptions;
use live_core::LiveScreen;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Target used by log lines meant to stream above the sticky blocks rather
/// than only into the rolling log file.
const DEMO_TARGET: &str = "live_screen.demo";

#[derive(Parser, Debug)]
#[command(name = "live-screen", version, about = "Terminal live-screen engine demo")]
struct Args {
    /// Optional path to a `live_screen.toml` (overrides discovery).
    #[arg(long = "config")]
    config: Option<std::path::PathBuf>,

    /// Number of sticky progress blocks to demo.
    #[arg(long = "blocks", default_value_t = 3)]
    blocks: u32,
}

struct ProgressState {
    label: String,
    percent: u8,
}

fn render_progress(state: &ProgressState) -> live_text::StyledData {
    let filled = (state.percent as usize * 20) / 100;
    let bar: String = "#".repeat(filled) + &"-".repeat(20 - filled);
    live_text::StyledData::plain(format!("{:<12} [{bar}] {:3}%", state.label, state.percent))
}

/// File-rolling subscriber for the full log, plus a second layer whose
/// writer is the engine itself (`LiveScreen::writer`) scoped to
/// `DEMO_TARGET` — demonstrates the engine's `std::io::Write` /
/// `MakeWriter` integration called out in `live-core::LiveWriter`'s docs.
fn configure_logging(engine: &LiveScreen<String, ProgressState>) -> Result<WorkerGuard> {
    let log_dir = Path::new(".");
    let file_appender = tracing_appender::rolling::never(log_dir, "live_screen.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().with_writer(nb_writer).with_ansi(false);

    let live_writer = engine.writer();
    let live_layer = fmt::layer()
        .with_writer(move || live_writer.clone())
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .with_filter(Targets::new().with_target(DEMO_TARGET, tracing::Level::INFO));

    let result = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(file_layer)
        .with(live_layer)
        .try_init();
    if result.is_err() {
        // Global subscriber already installed (e.g. under a test harness);
        // the guard still needs to be held so the non-blocking writer
        // keeps flushing for this process's lifetime.
    }
    Ok(guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "live_screen.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let opts = live_config::load_from(args.config.clone()).unwrap_or_else(|_| EngineOptions::default());

    let engine = match LiveScreen::start(opts) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("live-screen: {err} (falling back to plain output)");
            return Ok(());
        }
    };

    let _log_guard = configure_logging(&engine)?;
    install_panic_hook();
    info!(target: "live_screen.runtime", "startup");

    let block_ids: Vec<String> = (0..args.blocks.max(1)).map(|i| format!("task-{i}")).collect();

    for (i, id) in block_ids.iter().enumerate() {
        engine.add_block(
            id.clone(),
            ProgressState {
                label: format!("task {i}"),
                percent: 0,
            },
            std::sync::Arc::new(render_progress),
        );
    }

    let mut ticker = tokio::time::interval(Duration::from_millis(150));
    let mut writer = engine.writer();
    let mut elapsed_ticks: u32 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                elapsed_ticks += 1;
                let mut done = true;
                for (i, id) in block_ids.iter().enumerate() {
                    let percent = ((elapsed_ticks * (3 + i as u32 * 2)).min(100)) as u8;
                    engine.update(id.clone(), ProgressState { label: format!("task {i}"), percent });
                    if percent < 100 {
                        done = false;
                    }
                }
                info!(target: DEMO_TARGET, elapsed_ticks, "tick");
                if done {
                    let _ = writeln!(writer, "all tasks complete");
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(target: "live_screen.runtime", "ctrl_c_received");
                break;
            }
        }
    }

    engine.flush().await;
    engine.stop().await;
    Ok(())
}
