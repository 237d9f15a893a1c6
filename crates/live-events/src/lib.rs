//! Mailbox message types consumed by the actor in `live-core`, plus a
//! periodic tick source mirroring the teacher's `TickEventSource` — the only
//! async event producer this engine needs, since every other input arrives
//! through direct calls on the actor's channel.

use std::fmt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use live_state::RenderFn;

/// Everything the actor's single receive loop can act on in one tick cycle.
/// `AddBlock` and `Update` are fire-and-forget (spec.md's `add_block`/`update`
/// never block the caller); `Flush` and `Stop` carry a reply channel because
/// callers need to know the corresponding write has landed.
pub enum Message<Id, State> {
    AddBlock {
        id: Id,
        initial_state: State,
        render_fn: RenderFn<State>,
    },
    Update {
        id: Id,
        new_state: State,
    },
    Flush {
        reply: oneshot::Sender<()>,
    },
    Stop {
        reply: oneshot::Sender<()>,
    },
    Io(IoRequest),
    /// Emitted once per refresh interval by [`TickSource`]; drives a render
    /// pass only when a tick is armed (spec.md §4.4).
    Tick,
}

impl<Id: fmt::Debug, State> fmt::Debug for Message<Id, State> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::AddBlock { id, .. } => f.debug_struct("AddBlock").field("id", id).finish(),
            Message::Update { id, .. } => f.debug_struct("Update").field("id", id).finish(),
            Message::Flush { .. } => f.write_str("Flush"),
            Message::Stop { .. } => f.write_str("Stop"),
            Message::Io(req) => f.debug_tuple("Io").field(req).finish(),
            Message::Tick => f.write_str("Tick"),
        }
    }
}

/// A `put_chars_with`-style deferred producer: called at the moment the
/// engine is ready to consume it, not when it was enqueued (spec.md §6 design
/// note collapsing the `{mod, fun, args}` callback shape into one closure).
pub type PutCharsCallback = Box<dyn FnOnce() -> Vec<u8> + Send>;

/// The I/O device surface the engine exposes per spec.md §6: most operations
/// are writes that get queued for the next tick; everything else this engine
/// does not model as a terminal (reads, geometry queries, option negotiation)
/// is answered immediately with [`IoProtocolError::NotSupported`].
pub enum IoRequest {
    PutChars {
        bytes: Vec<u8>,
        reply: oneshot::Sender<IoReply>,
    },
    PutCharsWith {
        callback: PutCharsCallback,
        reply: oneshot::Sender<IoReply>,
    },
    Unsupported {
        op: UnsupportedOp,
        reply: oneshot::Sender<IoReply>,
    },
}

impl fmt::Debug for IoRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoRequest::PutChars { bytes, .. } => {
                f.debug_struct("PutChars").field("len", &bytes.len()).finish()
            }
            IoRequest::PutCharsWith { .. } => f.write_str("PutCharsWith"),
            IoRequest::Unsupported { op, .. } => f.debug_tuple("Unsupported").field(op).finish(),
        }
    }
}

/// I/O protocol requests this engine deliberately does not implement, named
/// after the collaborator interface in spec.md §6/§7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedOp {
    GetChars,
    GetLine,
    GetUntil,
    GetPassword,
    SetOpts,
    GetOpts,
    GetGeometry,
    Requests,
}

/// Reply delivered on an [`IoRequest`]'s channel once the engine has decided
/// what to do with it — immediately for unsupported ops, after the owning
/// tick's composite write succeeds for `PutChars`/`PutCharsWith`.
#[derive(Debug)]
pub enum IoReply {
    Ok,
    Error(IoProtocolError),
}

/// Errors the I/O device surface can report back to a caller (spec.md §7).
#[derive(Debug, Clone, thiserror::Error)]
pub enum IoProtocolError {
    #[error("operation {0:?} is not supported by this io device")]
    NotSupported(UnsupportedOp),
    #[error("malformed io request: {0}")]
    BadRequest(String),
}

/// Emits [`Message::Tick`] on a fixed interval, exactly mirroring the
/// teacher's `TickEventSource`: one `tokio::spawn`ed loop that exits as soon
/// as the send side observes a closed channel, no busy polling.
pub struct TickSource {
    interval: std::time::Duration,
}

impl TickSource {
    pub fn new(interval: std::time::Duration) -> Self {
        Self { interval }
    }

    pub fn spawn<Id, State>(self, tx: mpsc::UnboundedSender<Message<Id, State>>) -> JoinHandle<()>
    where
        Id: Send + 'static,
        State: Send + 'static,
    {
        let dur = self.interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(dur);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Message::Tick).is_err() {
                    tracing::debug!(target: "live_screen.events", "tick source exiting: mailbox closed");
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn tick_source_emits_on_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Message<u32, ()>>();
        let handle = TickSource::new(Duration::from_millis(5)).spawn(tx);
        let msg = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("tick should arrive")
            .expect("channel open");
        assert!(matches!(msg, Message::Tick));
        drop(rx);
        let _ = tokio::time::timeout(Duration::from_millis(100), handle).await;
    }

    #[tokio::test]
    async fn tick_source_exits_when_mailbox_closed() {
        let (tx, rx) = mpsc::unbounded_channel::<Message<u32, ()>>();
        let handle = TickSource::new(Duration::from_millis(5)).spawn(tx);
        drop(rx);
        tokio::time::timeout(Duration::from_millis(200), handle)
            .await
            .expect("tick source should exit promptly")
            .expect("task should not panic");
    }
}
