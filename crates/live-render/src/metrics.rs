//! Per-tick diagnostics (spec.md §4 addition, SPEC_FULL.md §4): counts blocks
//! repainted, bytes written, and which phases ran. Mirrors the teacher's
//! `partial_metrics`/`RenderPathMetrics` counters pattern — plain, since the
//! actor is the sole mutator and nothing here needs to be atomic.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderMetrics {
    pub ticks: u64,
    pub phase_a_runs: u64,
    pub blocks_repainted: u64,
    pub blocks_first_painted: u64,
    pub bytes_written: u64,
}

impl RenderMetrics {
    pub fn snapshot(&self) -> RenderMetrics {
        *self
    }
}
