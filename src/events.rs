//! Change notifications emitted by the store.
//!
//! Observers call [`PerformanceStore::subscribe`] and receive a
//! [`StateEvent`] for every store-mediated mutation and every reset.
//!
//! [`PerformanceStore::subscribe`]: crate::store::PerformanceStore::subscribe

#[cfg(feature = "subscribe")]
use tokio::sync::mpsc;

use crate::state::DatetimeFilter;

/// What changed in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    /// The filter was mutated through the store. Carries the value after
    /// the mutation.
    DatetimeChanged(DatetimeFilter),

    /// The state object was replaced with a fresh default-built instance.
    ///
    /// References obtained before the reset are now stale; re-fetch via
    /// `PerformanceStore::state()`. The event announces the swap, it does
    /// not re-point old references.
    Reset,
}

impl StateEvent {
    /// The filter snapshot carried by a `DatetimeChanged` event.
    pub fn datetime(&self) -> Option<&DatetimeFilter> {
        match self {
            StateEvent::DatetimeChanged(filter) => Some(filter),
            StateEvent::Reset => None,
        }
    }

    /// True for reset notifications.
    pub fn is_reset(&self) -> bool {
        matches!(self, StateEvent::Reset)
    }
}

/// Receiving half of a store subscription.
///
/// Events are buffered unbounded, so a slow observer never blocks the
/// store. Dropping the subscription unregisters it; the store prunes the
/// dead sender on its next emission.
#[cfg(feature = "subscribe")]
#[derive(Debug)]
pub struct Subscription {
    pub(crate) receiver: mpsc::UnboundedReceiver<StateEvent>,
}

#[cfg(feature = "subscribe")]
impl Subscription {
    /// Wait for the next event.
    ///
    /// Returns `None` once the store has been dropped and all buffered
    /// events have been consumed.
    pub async fn recv(&mut self) -> Option<StateEvent> {
        self.receiver.recv().await
    }

    /// Non-blocking read, for callers polling from a synchronous UI loop.
    pub fn try_recv(&mut self) -> Option<StateEvent> {
        self.receiver.try_recv().ok()
    }
}
