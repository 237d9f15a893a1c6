//! Actor / scheduler (C5): the engine's public API. Wires the block store
//! (`live-state`), write buffer and differential renderer (`live-render`),
//! terminal collaborator (`live-terminal`), and mailbox/tick plumbing
//! (`live-events`) into one long-lived `LiveScreen<Id, State>`.

mod actor;
mod error;
mod handle;
mod writer;

pub use error::StartError;
pub use handle::LiveScreen;
pub use writer::LiveWriter;
