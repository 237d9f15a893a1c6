//! `LiveWriter`: the engine as a `std::io::Write` sink, so it can be
//! installed as a `tracing_subscriber::fmt` writer target without
//! `live-core` itself depending on `tracing-subscriber` — the binary wires
//! it in via the blanket `MakeWriter for F: Fn() -> W where W: Write` impl.

use std::io;

use tokio::sync::{mpsc, oneshot};

use live_events::{IoRequest, Message};

/// Forwards every `write` call to `put_chars`, fire-and-forget — the reply
/// channel is dropped unread since `io::Write` is synchronous and this
/// engine's acknowledgement is only meaningful to async callers.
pub struct LiveWriter<Id, State> {
    tx: mpsc::UnboundedSender<Message<Id, State>>,
}

impl<Id, State> LiveWriter<Id, State> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Message<Id, State>>) -> Self {
        Self { tx }
    }
}

impl<Id, State> Clone for LiveWriter<Id, State> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<Id, State> io::Write for LiveWriter<Id, State> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (reply, _ack) = oneshot::channel();
        let _ = self.tx.send(Message::Io(IoRequest::PutChars {
            bytes: buf.to_vec(),
            reply,
        }));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
