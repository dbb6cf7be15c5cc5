//! Action sinks: where the book delivers its action stream.
//!
//! The book's only contract with a sink is ordered, one-at-a-time delivery
//! through [`ActionSink::on_action`]. A sink may block the book (a rendezvous
//! channel does); the book never reads back from it.
//!
//! ## Provided sinks
//!
//! | Sink                | Use                                          |
//! |---------------------|----------------------------------------------|
//! | `Vec<Action>`       | Collect in memory for assertions             |
//! | [`ActionLog`]       | Collect plus a SHA-256 digest of the stream  |
//! | [`ChannelSink`]     | Hand off to a consumer thread                |
//! | [`ConsolePrinter`]  | Print every action as it happens             |
//! | [`NoopSink`]        | Discard (throughput runs)                    |

use std::sync::mpsc::{self, Receiver, SyncSender};

use tracing::warn;

use crate::types::Action;

pub mod console;
pub mod recorder;

pub use console::{consume_until_done, render, ConsolePrinter};
pub use recorder::ActionLog;

/// Receiver of the book's action stream.
pub trait ActionSink {
    /// Deliver one action. Called in emission order, never concurrently.
    fn on_action(&mut self, action: Action);
}

impl ActionSink for Vec<Action> {
    #[inline]
    fn on_action(&mut self, action: Action) {
        self.push(action);
    }
}

impl<S: ActionSink + ?Sized> ActionSink for &mut S {
    #[inline]
    fn on_action(&mut self, action: Action) {
        (**self).on_action(action);
    }
}

impl<S: ActionSink + ?Sized> ActionSink for Box<S> {
    #[inline]
    fn on_action(&mut self, action: Action) {
        (**self).on_action(action);
    }
}

/// Sink that drops every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ActionSink for NoopSink {
    #[inline]
    fn on_action(&mut self, _action: Action) {}
}

/// Blocking hand-off to a consumer on another thread.
///
/// With capacity 0 every `on_action` waits until the consumer has taken the
/// action, so the consumer observes the book in lock step.
///
/// ```
/// use dense_lob::sink::{ActionSink, ChannelSink};
/// use dense_lob::types::Action;
///
/// let (mut sink, rx) = ChannelSink::bounded(4);
/// sink.on_action(Action::done());
/// assert!(rx.recv().unwrap().is_done());
/// ```
#[derive(Debug)]
pub struct ChannelSink {
    tx: SyncSender<Action>,
    disconnected: bool,
}

impl ChannelSink {
    pub fn new(tx: SyncSender<Action>) -> Self {
        Self {
            tx,
            disconnected: false,
        }
    }

    /// Create a sink and its receiver with the given buffer capacity
    pub fn bounded(capacity: usize) -> (Self, Receiver<Action>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self::new(tx), rx)
    }

    /// Create an unbuffered (rendezvous) sink and its receiver
    pub fn rendezvous() -> (Self, Receiver<Action>) {
        Self::bounded(0)
    }

    /// Whether the receiver has gone away
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl ActionSink for ChannelSink {
    fn on_action(&mut self, action: Action) {
        if self.disconnected {
            return;
        }
        if self.tx.send(action).is_err() {
            warn!("action consumer hung up, dropping the rest of the stream");
            self.disconnected = true;
        }
    }
}
