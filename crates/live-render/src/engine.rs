//! Differential renderer (C4): the core of the engine. Given the current
//! block store and write queue, computes the minimal ANSI byte stream that
//! reconciles the screen with the model, in the three phases of spec.md
//! §4.3 — flush above-writes, redraw changed/invalidated blocks, paint newly
//! added blocks — and concatenates them into one composite write.

use std::hash::Hash;

use live_state::BlockStore;
use live_text::{BoxOptions, render_block, render_box};

use crate::cursor::{cursor_down, cursor_up};
use crate::metrics::RenderMetrics;
use crate::write_queue::WriteQueue;

/// Everything one tick produced: the composite byte stream to hand the
/// terminal backend in a single write, and the reply callbacks for Phase A's
/// writers — invoked by the caller only *after* that write succeeds (spec.md
/// §4.3: "This reply must happen after the composite write succeeds, never
/// before").
pub struct TickOutcome<F> {
    pub bytes: Vec<u8>,
    pub write_replies: Vec<F>,
}

/// Stateless apart from its metrics — all persistent render state (cached
/// content/heights, rendered/pending ids) lives in the [`BlockStore`] it is
/// given each call.
#[derive(Debug, Default)]
pub struct RenderEngine {
    metrics: RenderMetrics,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> RenderMetrics {
        self.metrics.snapshot()
    }

    /// Runs one tick: drains `write_queue` (Phase A), redraws invalidated
    /// blocks (Phase B), paints newly registered blocks (Phase C), and
    /// mutates `store` in place to reflect the new paint. `above_paint_done`
    /// is updated in place per spec.md §3/§4.3.
    pub fn tick<Id, State, F>(
        &mut self,
        store: &mut BlockStore<Id, State>,
        write_queue: &mut WriteQueue<F>,
        width: usize,
        above_paint_done: &mut bool,
    ) -> TickOutcome<F>
    where
        Id: Eq + Hash + Clone,
        State: Clone,
    {
        let width = width.max(1);
        self.metrics.ticks += 1;
        let span = tracing::trace_span!(
            target: "engine.render",
            "tick",
            tick = self.metrics.ticks,
            blocks = store.len(),
            width
        );
        let _enter = span.enter();

        let (phase_a_text, write_replies, phase_a_ran) =
            self.phase_a(store, write_queue, width, *above_paint_done);
        if phase_a_ran {
            *above_paint_done = true;
            self.metrics.phase_a_runs += 1;
        }

        let phase_b_text = self.phase_b(store, width, phase_a_ran);
        let phase_c_text = self.phase_c(store, width);

        let mut composite = String::new();
        if let Some(a) = &phase_a_text {
            composite.push_str(a);
        }
        if let Some(b) = &phase_b_text {
            composite.push_str(b);
        }
        if let Some(c) = &phase_c_text {
            composite.push_str(c);
        }

        store.clear_pending_states();
        let bytes = composite.into_bytes();
        self.metrics.bytes_written += bytes.len() as u64;

        TickOutcome {
            bytes,
            write_replies,
        }
    }

    /// Phase A — flush `write_queue`. Returns the rendered text (if any),
    /// the reply callbacks in FIFO submission order, and whether the phase
    /// actually ran (write_queue was non-empty).
    fn phase_a<Id, State, F>(
        &mut self,
        store: &BlockStore<Id, State>,
        write_queue: &mut WriteQueue<F>,
        width: usize,
        above_paint_done: bool,
    ) -> (Option<String>, Vec<F>, bool)
    where
        Id: Eq + Hash + Clone,
        State: Clone,
    {
        if write_queue.is_empty() {
            return (None, Vec::new(), false);
        }

        let total_height: usize = store
            .rendered_blocks()
            .iter()
            .filter_map(|id| store.last_height(id))
            .sum();
        let cursor_up_count = if above_paint_done {
            total_height + 1
        } else {
            total_height
        };

        let entries = write_queue.drain_fifo();
        let mut combined = Vec::new();
        for (bytes, _) in &entries {
            combined.extend_from_slice(bytes);
        }

        let text = if cursor_up_count == 0 {
            String::from_utf8_lossy(&combined).into_owned()
        } else {
            let padded = live_text::pad_to_width(&combined, width);
            format!(
                "{}{}",
                cursor_up(cursor_up_count),
                String::from_utf8_lossy(&padded)
            )
        };

        let replies = entries.into_iter().map(|(_, r)| r).collect();
        (Some(text), replies, true)
    }

    /// Phase B — redraw invalidated blocks in place. Walks `rendered_blocks`
    /// top to bottom, tracking `(total_height_before_cursor, pending_offset,
    /// force)` exactly as spec.md §4.3 describes. Every block this phase
    /// emits gets a trailing `\n`, which is what lets every cursor motion in
    /// this engine — here and in Phase A/C — stay a pure row motion: the
    /// terminal's column is always 0 at the start of a phase because the
    /// previous write always ended on a real newline.
    fn phase_b<Id, State>(
        &mut self,
        store: &mut BlockStore<Id, State>,
        width: usize,
        phase_a_ran: bool,
    ) -> Option<String>
    where
        Id: Eq + Hash + Clone,
        State: Clone,
    {
        let changed = store.take_pending();
        let rendered: Vec<Id> = store.rendered_blocks().to_vec();

        let mut force = phase_a_ran;
        let mut total_height_before_cursor = 0usize;
        let mut pending_offset = 0usize;
        let mut body = String::new();
        let mut emitted_any = false;

        for id in &rendered {
            let old_h = store.last_height(id).unwrap_or(1);

            if force || changed.contains(id) {
                let state = store.effective_state(id).cloned();
                let render_fn = store.render_fn(id);
                if let (Some(state), Some(render_fn)) = (state, render_fn) {
                    let content = render_fn(&state).into_ansi_string();
                    let (rendered_text, new_h) = render_block(&content, width);
                    let max_h = new_h.max(old_h);
                    let boxed = render_box(&rendered_text, BoxOptions::new(width, max_h));

                    if pending_offset > 0 {
                        body.push_str(&cursor_down(pending_offset));
                        pending_offset = 0;
                    }
                    body.push_str(&boxed);
                    body.push('\n');

                    store.record_repaint(id, boxed, max_h);
                    self.metrics.blocks_repainted += 1;
                    emitted_any = true;

                    if new_h > old_h {
                        force = true;
                    }
                }
            } else {
                pending_offset += old_h;
            }

            total_height_before_cursor += old_h;
        }

        if !emitted_any {
            return None;
        }

        let prefix = if !phase_a_ran && total_height_before_cursor > 0 {
            cursor_up(total_height_before_cursor)
        } else {
            String::new()
        };
        let suffix = cursor_down(pending_offset);

        Some(format!("{prefix}{body}{suffix}"))
    }

    /// Phase C — paint every newly registered block. New blocks go at the
    /// bottom and the cursor already sits there, so no cursor motion is
    /// needed; each painted block still ends with `\n` so the cursor sits
    /// below the last one, per invariant 4.
    fn phase_c<Id, State>(&mut self, store: &mut BlockStore<Id, State>, width: usize) -> Option<String>
    where
        Id: Eq + Hash + Clone,
        State: Clone,
    {
        let pending: Vec<Id> = store.pending_blocks().to_vec();
        if pending.is_empty() {
            return None;
        }

        let mut body = String::new();
        let mut paints = Vec::with_capacity(pending.len());
        for id in &pending {
            let state = store.effective_state(id).cloned();
            let render_fn = store.render_fn(id);
            if let (Some(state), Some(render_fn)) = (state, render_fn) {
                let content = render_fn(&state).into_ansi_string();
                let (rendered_text, height) = render_block(&content, width);
                body.push_str(&rendered_text);
                body.push('\n');
                paints.push((id.clone(), rendered_text, height));
                self.metrics.blocks_first_painted += 1;
            }
        }
        store.commit_pending_blocks(paints);
        Some(body)
    }
}
