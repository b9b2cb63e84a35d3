//! Publish/subscribe abstraction for change notices.
//!
//! ## Design
//!
//! The bus is intentionally **lightweight** and makes minimal assumptions:
//!
//! - **Transport-agnostic**: the in-memory implementation covers a single
//!   process; nothing in the contract prevents a different backing later.
//! - **Broadcast semantics**: every subscriber gets a copy of every notice.
//! - **Best-effort fan-out**: notices are hints to refresh, not commands.
//!   A listener that misses one re-reads state the next time it renders, so
//!   at-least-once delivery and duplicate notices are both acceptable.
//! - **No persistence**: the authoritative state lives with the services;
//!   the bus only says "something you cached may be stale".

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to the notice stream.
///
/// Each subscription receives a copy of every notice published after it was
/// created. Subscriptions are single-consumer: hand one to each listener.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next notice is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a notice without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a notice.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently queued, returning the notices in order.
    ///
    /// Useful for UI loops that poll once per frame/tick.
    pub fn drain(&self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(msg) = self.receiver.try_recv() {
            out.push(msg);
        }
        out
    }
}

/// Notice bus (pub/sub contract).
///
/// `publish()` can fail only for implementation-internal reasons; publishers
/// treat failures as log-and-continue, never as an operation failure, because
/// the state change the notice describes has already happened.
pub trait NoticeBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> NoticeBus<M> for Arc<B>
where
    B: NoticeBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
