//! # rumstate
//!
//! Shared time-range filter state for RUM (Real User Monitoring)
//! performance dashboards.
//!
//! A performance view needs one piece of state shared between its widgets:
//! the time-range filter (a relative window like "the last 15 minutes", or
//! a fixed timestamp pair). This crate holds that state in an explicit
//! [`PerformanceStore`] with a reset-to-defaults operation and an
//! observer interface, instead of an implicit framework-reactive module
//! singleton.
//!
//! ## Modules
//!
//! - **[`store`]**: the state holder ([`PerformanceStore`]) with reset,
//!   mutation helpers, and subscriptions
//! - **[`state`]**: the shared state object and filter types
//! - **[`period`]**: relative-period tokens (`"15m"`, `"2h"`, ...)
//! - **[`events`]**: change notifications delivered to subscribers
//!
//! ## Quick start
//!
//! ```
//! use rumstate::{PerformanceStore, RelativeTimePeriod, StateEvent};
//!
//! let store = PerformanceStore::new();
//! let mut events = store.subscribe();
//!
//! // Widgets read the shared reference...
//! let state = store.state();
//! assert_eq!(state.datetime().relative_time_period.to_string(), "15m");
//!
//! // ...mutate through the store...
//! store.set_relative_period(RelativeTimePeriod::hours(1));
//! assert!(events.try_recv().unwrap().datetime().is_some());
//!
//! // ...and reset back to the defaults.
//! store.reset();
//! assert_eq!(events.try_recv(), Some(StateEvent::Reset));
//! ```
//!
//! ## Reset semantics
//!
//! `reset()` replaces the state object wholesale rather than mutating it in
//! place. A reference obtained before the reset keeps its (now stale)
//! values and is disconnected from the store; consumers re-fetch via
//! [`PerformanceStore::state`] when they see [`StateEvent::Reset`].
//! `Arc` pointer identity makes the swap observable:
//!
//! ```
//! use std::sync::Arc;
//! use rumstate::PerformanceStore;
//!
//! let store = PerformanceStore::new();
//! let before = store.state();
//! store.reset();
//! assert!(!Arc::ptr_eq(&before, &store.state()));
//! ```

pub mod events;
pub mod period;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use events::StateEvent;
#[cfg(feature = "subscribe")]
pub use events::Subscription;
pub use period::{PeriodParseError, PeriodUnit, RelativeTimePeriod};
pub use state::{DatetimeFilter, PerformanceState, StateData, TimeRange, TimeRangeKind};
pub use store::PerformanceStore;
