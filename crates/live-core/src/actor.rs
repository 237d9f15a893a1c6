//! The actor (C5): single-threaded mailbox loop owning the block store,
//! write queue, differential renderer, and the terminal write handle.
//! Mirrors the teacher's event loop shape — `while let Some(msg) =
//! rx.recv().await { match msg { ... } }` — rather than a `select!` over
//! several sources, since every input this engine has (including the
//! periodic tick) already funnels through one `Message` enum.

use std::hash::Hash;

use tokio::sync::{mpsc, oneshot};

use live_config::TerminalWidth;
use live_events::{IoProtocolError, IoReply, IoRequest, Message};
use live_render::{RenderEngine, WriteQueue};
use live_state::BlockStore;
use live_terminal::TerminalBackend;

pub(crate) struct Actor<Id, State, B> {
    store: BlockStore<Id, State>,
    write_queue: WriteQueue<oneshot::Sender<IoReply>>,
    engine: RenderEngine,
    backend: B,
    width_mode: TerminalWidth,
    last_known_width: usize,
    above_paint_done: bool,
    tick_armed: bool,
    rx: mpsc::UnboundedReceiver<Message<Id, State>>,
}

impl<Id, State, B> Actor<Id, State, B>
where
    Id: Eq + Hash + Clone,
    State: Clone,
    B: TerminalBackend,
{
    pub(crate) fn new(
        rx: mpsc::UnboundedReceiver<Message<Id, State>>,
        backend: B,
        width_mode: TerminalWidth,
        initial_width: u16,
    ) -> Self {
        Self {
            store: BlockStore::new(),
            write_queue: WriteQueue::new(),
            engine: RenderEngine::new(),
            backend,
            width_mode,
            last_known_width: initial_width as usize,
            above_paint_done: false,
            tick_armed: false,
            rx,
        }
    }

    pub(crate) async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                Message::AddBlock {
                    id,
                    initial_state,
                    render_fn,
                } => self.handle_add_block(id, initial_state, render_fn),
                Message::Update { id, new_state } => self.store.set_state(&id, new_state),
                Message::Flush { reply } => {
                    if !self.handle_flush(reply) {
                        break;
                    }
                }
                Message::Stop { reply } => {
                    self.handle_stop(reply);
                    break;
                }
                Message::Io(req) => self.handle_io(req),
                Message::Tick => {
                    if !self.handle_tick() {
                        break;
                    }
                }
            }
        }
        tracing::debug!(target: "live_screen.actor", "mailbox closed, actor exiting");
    }

    /// spec.md §4.4 arming discipline: `add_block` arms a tick only if none
    /// is currently armed *and* the store is empty at the moment of the
    /// call. This is evaluated before the new block is registered, so the
    /// very first block registered into an otherwise-idle-but-already-primed
    /// engine does not arm a second tick.
    fn handle_add_block(
        &mut self,
        id: Id,
        initial_state: State,
        render_fn: live_state::RenderFn<State>,
    ) {
        let should_arm = !self.tick_armed && self.store.is_empty();
        self.store.register(id, initial_state, render_fn);
        if should_arm {
            self.tick_armed = true;
        }
    }

    /// Returns `false` if the actor should terminate (terminal write failed
    /// during the forced tick); the caller still gets its `ok` reply either
    /// way so `flush().await` never hangs.
    fn handle_flush(&mut self, reply: oneshot::Sender<()>) -> bool {
        let width = self.resolve_width();
        let ok = self.run_tick_and_write(width);
        if ok {
            self.store.clear_all();
            self.write_queue.clear();
            self.above_paint_done = false;
            self.tick_armed = false;
        }
        let _ = reply.send(());
        ok
    }

    fn handle_stop(&mut self, reply: oneshot::Sender<()>) {
        let width = self.resolve_width();
        self.run_tick_and_write(width);
        let _ = reply.send(());
    }

    fn handle_io(&mut self, req: IoRequest) {
        match req {
            IoRequest::PutChars { bytes, reply } => self.enqueue_put_chars(bytes, reply),
            IoRequest::PutCharsWith { callback, reply } => {
                let bytes = callback();
                self.enqueue_put_chars(bytes, reply);
            }
            IoRequest::Unsupported { op, reply } => {
                let _ = reply.send(IoReply::Error(IoProtocolError::NotSupported(op)));
            }
        }
    }

    fn enqueue_put_chars(&mut self, bytes: Vec<u8>, reply: oneshot::Sender<IoReply>) {
        let should_arm = !self.tick_armed;
        self.write_queue.push(bytes, reply);
        if should_arm {
            self.tick_armed = true;
        }
    }

    fn handle_tick(&mut self) -> bool {
        if !self.tick_armed {
            return true;
        }
        let width = self.resolve_width();
        if !self.run_tick_and_write(width) {
            return false;
        }
        // spec.md §3 invariant 5: re-armed iff there is still work.
        self.tick_armed = !self.store.is_empty() || !self.write_queue.is_empty();
        true
    }

    /// Runs one differential-render tick and performs the one composite
    /// write it produces. Returns `false` if the terminal write failed,
    /// meaning the caller should treat the actor as terminating (spec.md §7:
    /// "a write failure should terminate the actor cleanly ... final tick is
    /// skipped to avoid infinite recursion").
    fn run_tick_and_write(&mut self, width: usize) -> bool {
        let outcome = self.engine.tick(
            &mut self.store,
            &mut self.write_queue,
            width,
            &mut self.above_paint_done,
        );

        if !outcome.bytes.is_empty() {
            if let Err(err) = self.backend.terminal_write(&outcome.bytes) {
                tracing::error!(target: "live_screen.actor", ?err, "terminal_write_failed");
                return false;
            }
        }

        for reply in outcome.write_replies {
            let _ = reply.send(IoReply::Ok);
        }
        true
    }

    fn resolve_width(&mut self) -> usize {
        match self.width_mode {
            TerminalWidth::Fixed(cols) => cols as usize,
            TerminalWidth::Auto => {
                if let Some(cols) = self.backend.terminal_columns() {
                    self.last_known_width = cols as usize;
                }
                self.last_known_width
            }
        }
    }
}
