//! Differential renderer and write buffer (C3 + C4): the core of the engine.
//! Given a [`live_state::BlockStore`] and a queue of pending above-writes,
//! computes the minimal ANSI byte stream that reconciles the terminal with
//! the model and emits it in a single composite write per tick.

pub mod cursor;
pub mod engine;
pub mod metrics;
pub mod write_queue;

pub use cursor::{cursor_down, cursor_up};
pub use engine::{RenderEngine, TickOutcome};
pub use metrics::RenderMetrics;
pub use write_queue::WriteQueue;
