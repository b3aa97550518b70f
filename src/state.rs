//! Data model for the performance view's time-range filter.
//!
//! View code addresses the filter as `data.datetime`; the nesting leaves
//! room for sibling view state without reshaping consumers.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::period::RelativeTimePeriod;

/// How the filter's time range should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRangeKind {
    /// A duration relative to "now", taken from `relative_time_period`.
    #[default]
    Relative,
    /// The fixed `[start_time, end_time]` window.
    Absolute,
}

/// A concrete query window in epoch microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

/// The time-range filter for the performance view.
///
/// `DatetimeFilter::default()` is the immutable template every fresh state
/// is built from: zero timestamps, a 15-minute relative window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatetimeFilter {
    /// Window start in epoch microseconds (absolute mode).
    pub start_time: i64,
    /// Window end in epoch microseconds (absolute mode).
    pub end_time: i64,
    /// Window length for relative mode.
    pub relative_time_period: RelativeTimePeriod,
    /// Which of the two representations is active.
    pub value_type: TimeRangeKind,
}

impl Default for DatetimeFilter {
    fn default() -> Self {
        Self {
            start_time: 0,
            end_time: 0,
            relative_time_period: RelativeTimePeriod::default(),
            value_type: TimeRangeKind::Relative,
        }
    }
}

impl DatetimeFilter {
    /// Resolve the filter to a concrete window, given "now" in epoch
    /// microseconds.
    ///
    /// Relative filters anchor their end at `now_micros`; absolute filters
    /// return the stored timestamps verbatim.
    pub fn resolve(&self, now_micros: i64) -> TimeRange {
        match self.value_type {
            TimeRangeKind::Relative => TimeRange {
                start: now_micros.saturating_sub(self.relative_time_period.as_micros()),
                end: now_micros,
            },
            TimeRangeKind::Absolute => TimeRange {
                start: self.start_time,
                end: self.end_time,
            },
        }
    }
}

/// Inner payload of the shared state object.
///
/// The filter sits behind a lock so the object stays freely writable
/// through any shared reference, matching the source's open mutation model.
#[derive(Debug, Default)]
pub struct StateData {
    pub datetime: RwLock<DatetimeFilter>,
}

/// The shared, observable performance view state.
///
/// Handed out as `Arc<PerformanceState>` by [`PerformanceStore::state`];
/// the store's reset swaps in a fresh instance rather than mutating in
/// place, so the `Arc` identity doubles as the staleness marker.
///
/// [`PerformanceStore::state`]: crate::store::PerformanceStore::state
#[derive(Debug, Default)]
pub struct PerformanceState {
    pub data: StateData,
}

impl PerformanceState {
    /// Snapshot (clone) of the current filter value.
    pub fn datetime(&self) -> DatetimeFilter {
        self.data.datetime.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_values() {
        let filter = DatetimeFilter::default();
        assert_eq!(filter.start_time, 0);
        assert_eq!(filter.end_time, 0);
        assert_eq!(filter.relative_time_period.to_string(), "15m");
        assert_eq!(filter.value_type, TimeRangeKind::Relative);
    }

    #[test]
    fn resolve_relative_anchors_at_now() {
        let filter = DatetimeFilter::default();
        let now = 1_700_000_000_000_000;

        let range = filter.resolve(now);
        assert_eq!(range.end, now);
        assert_eq!(range.start, now - 15 * 60 * 1_000_000);
    }

    #[test]
    fn resolve_absolute_returns_stored_window() {
        let filter = DatetimeFilter {
            start_time: 100,
            end_time: 200,
            value_type: TimeRangeKind::Absolute,
            ..Default::default()
        };

        let range = filter.resolve(1_700_000_000_000_000);
        assert_eq!(range, TimeRange { start: 100, end: 200 });
    }

    #[test]
    fn resolve_relative_saturates_near_epoch() {
        let filter = DatetimeFilter::default();
        let range = filter.resolve(i64::MIN + 1);
        assert_eq!(range.start, i64::MIN);
    }

    #[test]
    fn fresh_state_carries_the_template() {
        let state = PerformanceState::default();
        assert_eq!(state.datetime(), DatetimeFilter::default());
    }

    #[test]
    fn filter_serializes_with_tagged_kind() {
        let json = serde_json::to_value(DatetimeFilter::default()).unwrap();
        assert_eq!(json["value_type"], "relative");
        assert_eq!(json["relative_time_period"], "15m");
        assert_eq!(json["start_time"], 0);
    }
}
