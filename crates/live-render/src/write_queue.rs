//! Write buffer (C3): queues "put-above" byte chunks and their reply
//! addresses between ticks.
//!
//! spec.md describes the source's internal store as a LIFO stack that the
//! renderer reverses on drain to recover submission order; a `VecDeque` gets
//! the same FIFO drain order directly, so there is nothing to reverse here —
//! an implementation detail of the original store, not an observable
//! behavior difference (submission order in, submission order out either
//! way).

use std::collections::VecDeque;

/// One `put_chars`/`put_chars_with` submission: the bytes to paint above the
/// sticky region and a reply callback invoked once those bytes have actually
/// landed on the terminal (never before — spec.md §4.3 Phase A).
pub struct WriteQueue<F> {
    items: VecDeque<(Vec<u8>, F)>,
}

impl<F> Default for WriteQueue<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> WriteQueue<F> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn push(&mut self, bytes: Vec<u8>, reply: F) {
        self.items.push_back((bytes, reply));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Drains every queued entry in FIFO (submission) order.
    pub fn drain_fifo(&mut self) -> Vec<(Vec<u8>, F)> {
        self.items.drain(..).collect()
    }

    /// Used by `flush`, which detaches everything without giving queued
    /// writers a reply — matching the Erlang source's "flush resets state
    /// wholesale" semantics (callers awaiting a `put_chars` reply across a
    /// `flush` are not part of the documented contract).
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
