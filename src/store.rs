//! The performance state store.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

#[cfg(feature = "subscribe")]
use parking_lot::Mutex;
#[cfg(feature = "subscribe")]
use tokio::sync::mpsc;

#[cfg(feature = "subscribe")]
use crate::events::Subscription;
use crate::events::StateEvent;
use crate::period::RelativeTimePeriod;
use crate::state::{DatetimeFilter, PerformanceState, TimeRangeKind};

/// Holds the performance view's shared state and allows resetting it to
/// the default template.
///
/// The store is the explicit lifecycle owner of the state object: whoever
/// constructs it (typically the dashboard controller that owns the view)
/// decides how long it lives and who gets a reference.
///
/// # Example
///
/// ```
/// use rumstate::{PerformanceStore, RelativeTimePeriod, TimeRangeKind};
///
/// let store = PerformanceStore::new();
/// assert_eq!(store.datetime().relative_time_period.to_string(), "15m");
///
/// store.set_relative_period(RelativeTimePeriod::hours(1));
/// assert_eq!(store.datetime().value_type, TimeRangeKind::Relative);
///
/// store.reset();
/// assert_eq!(store.datetime().relative_time_period.to_string(), "15m");
/// ```
///
/// # Staleness on reset
///
/// `reset()` swaps the held reference for a fresh one instead of mutating
/// in place. Any `Arc<PerformanceState>` obtained before the reset keeps
/// working but is disconnected: mutating it no longer affects what
/// [`state`](Self::state) returns. Subscribers get a [`StateEvent::Reset`]
/// telling them to re-fetch.
///
/// # Notifications
///
/// Only store-mediated mutations notify. Writing through the shared
/// object's lock directly is allowed (callers are trusted) but bypasses
/// the event stream.
#[derive(Debug)]
pub struct PerformanceStore {
    current: RwLock<Arc<PerformanceState>>,
    #[cfg(feature = "subscribe")]
    subscribers: Mutex<Vec<mpsc::UnboundedSender<StateEvent>>>,
}

impl PerformanceStore {
    /// Create a store seeded from the default template.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(PerformanceState::default())),
            #[cfg(feature = "subscribe")]
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// The current shared state reference.
    pub fn state(&self) -> Arc<PerformanceState> {
        self.current.read().clone()
    }

    /// Snapshot (clone) of the current filter value.
    pub fn datetime(&self) -> DatetimeFilter {
        self.state().datetime()
    }

    /// Replace the state with a fresh instance built from the default
    /// template.
    ///
    /// Cannot fail. Previously obtained references become stale; see the
    /// type-level docs.
    pub fn reset(&self) {
        let fresh = Arc::new(PerformanceState::default());
        *self.current.write() = fresh;
        debug!("performance state reset to defaults");
        self.emit(StateEvent::Reset);
    }

    /// Switch the filter to a relative window of the given length.
    pub fn set_relative_period(&self, period: RelativeTimePeriod) {
        let snapshot = {
            let state = self.state();
            let mut datetime = state.data.datetime.write();
            datetime.relative_time_period = period;
            datetime.value_type = TimeRangeKind::Relative;
            datetime.clone()
        };
        self.emit(StateEvent::DatetimeChanged(snapshot));
    }

    /// Switch the filter to a fixed `[start, end]` window in epoch
    /// microseconds.
    pub fn set_absolute_range(&self, start: i64, end: i64) {
        let snapshot = {
            let state = self.state();
            let mut datetime = state.data.datetime.write();
            datetime.start_time = start;
            datetime.end_time = end;
            datetime.value_type = TimeRangeKind::Absolute;
            datetime.clone()
        };
        self.emit(StateEvent::DatetimeChanged(snapshot));
    }

    /// Register an observer for change notifications.
    ///
    /// The subscription receives every event emitted after this call.
    /// Dropping it is enough to unsubscribe.
    #[cfg(feature = "subscribe")]
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        Subscription { receiver: rx }
    }

    /// Fan an event out to live subscribers, pruning closed ones.
    #[cfg(feature = "subscribe")]
    fn emit(&self, event: StateEvent) {
        let mut subscribers = self.subscribers.lock();
        let before = subscribers.len();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        let pruned = before - subscribers.len();
        if pruned > 0 {
            debug!("pruned {} closed state subscriptions", pruned);
        }
    }

    #[cfg(not(feature = "subscribe"))]
    fn emit(&self, _event: StateEvent) {}
}

impl Default for PerformanceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_matches_template() {
        let store = PerformanceStore::new();
        let datetime = store.datetime();

        assert_eq!(datetime.start_time, 0);
        assert_eq!(datetime.end_time, 0);
        assert_eq!(datetime.relative_time_period.to_string(), "15m");
        assert_eq!(datetime.value_type, TimeRangeKind::Relative);
    }

    #[test]
    fn reset_restores_default_template() {
        let store = PerformanceStore::new();

        store.set_absolute_range(1_700_000_000_000_000, 1_700_000_900_000_000);
        store.set_relative_period(RelativeTimePeriod::hours(6));
        store.state().data.datetime.write().end_time = 99;

        store.reset();
        assert_eq!(store.datetime(), DatetimeFilter::default());
    }

    #[test]
    fn reset_swaps_object_identity() {
        let store = PerformanceStore::new();
        let before = store.state();

        store.reset();
        let after = store.state();

        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn double_reset_yields_distinct_identities() {
        let store = PerformanceStore::new();

        store.reset();
        let first = store.state();
        store.reset();
        let second = store.state();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.datetime(), DatetimeFilter::default());
        assert_eq!(second.datetime(), DatetimeFilter::default());
    }

    #[test]
    fn mutated_start_time_is_restored_by_reset() {
        let store = PerformanceStore::new();

        store.state().data.datetime.write().start_time = 1_700_000_000_000_000;
        assert_ne!(store.datetime().start_time, 0);

        store.reset();
        assert_eq!(store.datetime().start_time, 0);
    }

    #[test]
    fn stale_reference_mutation_does_not_affect_current() {
        let store = PerformanceStore::new();
        let stale = store.state();

        store.reset();
        stale.data.datetime.write().start_time = 42;

        assert_eq!(store.datetime().start_time, 0);
        assert_eq!(stale.datetime().start_time, 42);
    }

    #[test]
    fn direct_mutation_is_visible_through_other_references() {
        let store = PerformanceStore::new();
        let a = store.state();
        let b = store.state();

        assert!(Arc::ptr_eq(&a, &b));
        a.data.datetime.write().start_time = 7;
        assert_eq!(b.datetime().start_time, 7);
        assert_eq!(store.datetime().start_time, 7);
    }

    #[test]
    fn set_absolute_range_flips_kind() {
        let store = PerformanceStore::new();
        store.set_absolute_range(100, 200);

        let datetime = store.datetime();
        assert_eq!(datetime.value_type, TimeRangeKind::Absolute);
        assert_eq!(datetime.start_time, 100);
        assert_eq!(datetime.end_time, 200);
    }

    #[test]
    fn set_relative_period_flips_kind_back() {
        let store = PerformanceStore::new();
        store.set_absolute_range(100, 200);
        store.set_relative_period(RelativeTimePeriod::minutes(30));

        let datetime = store.datetime();
        assert_eq!(datetime.value_type, TimeRangeKind::Relative);
        assert_eq!(datetime.relative_time_period, RelativeTimePeriod::minutes(30));
        // Absolute timestamps are kept; only the active representation moves.
        assert_eq!(datetime.start_time, 100);
    }

    #[cfg(feature = "subscribe")]
    #[test]
    fn subscriber_receives_mutation_and_reset_events() {
        let store = PerformanceStore::new();
        let mut events = store.subscribe();

        store.set_relative_period(RelativeTimePeriod::hours(1));
        store.reset();

        let first = events.try_recv().unwrap();
        let changed = first.datetime().unwrap();
        assert_eq!(changed.relative_time_period, RelativeTimePeriod::hours(1));

        assert_eq!(events.try_recv(), Some(StateEvent::Reset));
        assert_eq!(events.try_recv(), None);
    }

    #[cfg(feature = "subscribe")]
    #[test]
    fn dropped_subscriber_does_not_wedge_emission() {
        let store = PerformanceStore::new();
        let dead = store.subscribe();
        drop(dead);

        let mut live = store.subscribe();
        store.reset();

        assert_eq!(live.try_recv(), Some(StateEvent::Reset));
    }

    #[cfg(feature = "subscribe")]
    #[test]
    fn events_buffer_until_received() {
        let store = PerformanceStore::new();
        let mut events = store.subscribe();

        store.set_absolute_range(1, 2);
        store.set_absolute_range(3, 4);

        let first = events.try_recv().unwrap();
        assert_eq!(first.datetime().unwrap().start_time, 1);
        let second = events.try_recv().unwrap();
        assert_eq!(second.datetime().unwrap().start_time, 3);
    }

    #[cfg(feature = "subscribe")]
    #[test]
    fn async_recv_delivers_events() {
        let store = PerformanceStore::new();
        let mut events = store.subscribe();

        store.reset();

        let event = tokio_test::block_on(events.recv());
        assert_eq!(event, Some(StateEvent::Reset));
    }

    #[cfg(feature = "subscribe")]
    #[test]
    fn recv_ends_after_store_is_dropped() {
        let store = PerformanceStore::new();
        let mut events = store.subscribe();

        store.reset();
        drop(store);

        assert_eq!(tokio_test::block_on(events.recv()), Some(StateEvent::Reset));
        assert_eq!(tokio_test::block_on(events.recv()), None);
    }
}
