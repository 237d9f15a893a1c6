//! Public API surface (spec.md §6): `LiveScreen::start` plus thin, mostly
//! fire-and-forget methods that just push a [`Message`] into the actor's
//! mailbox. Public functions are senders; all the real work happens in
//! [`crate::actor::Actor`].

use std::hash::Hash;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use live_config::EngineOptions;
use live_events::{IoRequest, Message, PutCharsCallback, TickSource};
use live_state::RenderFn;
use live_terminal::{CrosstermBackend, TerminalBackend};

use crate::actor::Actor;
use crate::error::StartError;
use crate::writer::LiveWriter;

/// Handle to a running engine. Dropping it without calling [`Self::stop`]
/// leaves the actor and tick source running detached — callers that care
/// about a clean shutdown should always call `stop().await`.
pub struct LiveScreen<Id, State> {
    tx: mpsc::UnboundedSender<Message<Id, State>>,
    actor_handle: JoinHandle<()>,
    tick_handle: JoinHandle<()>,
}

impl<Id, State> LiveScreen<Id, State>
where
    Id: Eq + Hash + Clone + Send + 'static,
    State: Clone + Send + 'static,
{
    /// Starts the engine against the real terminal (`live-terminal`'s
    /// `crossterm` backend).
    pub fn start(opts: EngineOptions) -> Result<Self, StartError> {
        Self::start_with_backend(opts, CrosstermBackend::new())
    }

    /// Starts the engine against a caller-supplied [`TerminalBackend`] —
    /// the seam used by tests to run against `RecordingBackend` instead of
    /// a real tty.
    pub fn start_with_backend<B>(opts: EngineOptions, backend: B) -> Result<Self, StartError>
    where
        B: TerminalBackend + Send + 'static,
    {
        // spec.md §3 lifecycle: probe the width source once at startup
        // regardless of fixed-vs-auto width, to confirm a terminal is
        // actually attached.
        let initial_cols = backend.terminal_columns().ok_or(StartError::NoTerminal)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let actor = Actor::new(rx, backend, opts.terminal_width, initial_cols);
        let actor_handle = tokio::spawn(actor.run());

        let refresh = Duration::from_millis(opts.refresh_every_ms.max(1));
        let tick_handle = TickSource::new(refresh).spawn(tx.clone());

        Ok(Self {
            tx,
            actor_handle,
            tick_handle,
        })
    }

    /// Registers a new sticky block. Fire-and-forget; re-registering an id
    /// that is already known is undefined behavior upstream (spec.md §4.1).
    pub fn add_block(&self, id: Id, initial_state: State, render_fn: RenderFn<State>) {
        let _ = self.tx.send(Message::AddBlock {
            id,
            initial_state,
            render_fn,
        });
    }

    /// Records a new state for `id`. Fire-and-forget; silently dropped if
    /// `id` is unknown (spec.md §4.1, §9 open question).
    pub fn update(&self, id: Id, new_state: State) {
        let _ = self.tx.send(Message::Update { id, new_state });
    }

    /// Runs an immediate tick, then detaches every block — the next
    /// registration starts a fresh terminal region (spec.md §4.4 `flush`).
    pub async fn flush(&self) {
        let (reply, ack) = oneshot::channel();
        if self.tx.send(Message::Flush { reply }).is_ok() {
            let _ = ack.await;
        }
    }

    /// Final tick, then the actor and tick source both exit. Consumes the
    /// handle: the engine is not usable after `stop` (spec.md §6).
    pub async fn stop(self) {
        let (reply, ack) = oneshot::channel();
        if self.tx.send(Message::Stop { reply }).is_ok() {
            let _ = ack.await;
        }
        self.tick_handle.abort();
        let _ = self.actor_handle.await;
    }

    /// Submits bytes to be painted above the sticky region on the next
    /// tick; resolves once that tick's composite write has succeeded.
    pub async fn put_chars(&self, bytes: Vec<u8>) {
        let (reply, ack) = oneshot::channel();
        if self
            .tx
            .send(Message::Io(IoRequest::PutChars { bytes, reply }))
            .is_ok()
        {
            let _ = ack.await;
        }
    }

    /// Deferred-producer form of [`Self::put_chars`]: `producer` is called
    /// synchronously by the actor at the moment it is ready to consume it,
    /// not when this call was made (spec.md §6, §9 design note).
    pub async fn put_chars_with(&self, producer: impl FnOnce() -> Vec<u8> + Send + 'static) {
        let callback: PutCharsCallback = Box::new(producer);
        let (reply, ack) = oneshot::channel();
        if self
            .tx
            .send(Message::Io(IoRequest::PutCharsWith { callback, reply }))
            .is_ok()
        {
            let _ = ack.await;
        }
    }

    /// A `std::io::Write` handle onto this engine's `put_chars`, suitable
    /// for installing as a `tracing_subscriber::fmt` writer target.
    pub fn writer(&self) -> LiveWriter<Id, State> {
        LiveWriter::new(self.tx.clone())
    }
}
