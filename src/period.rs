//! Relative time period tokens.
//!
//! The dashboard's relative picker expresses windows as compact tokens like
//! `"15m"` or `"2h"`: an amount followed by a unit suffix. This module turns
//! those tokens into a real value type instead of carrying raw strings
//! through the state object.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Suffix to unit mapping for period tokens.
///
/// Suffixes are case-sensitive: `m` is minutes, `M` is months.
const UNITS: &[(&str, PeriodUnit)] = &[
    ("s", PeriodUnit::Seconds),
    ("m", PeriodUnit::Minutes),
    ("h", PeriodUnit::Hours),
    ("d", PeriodUnit::Days),
    ("w", PeriodUnit::Weeks),
    ("M", PeriodUnit::Months),
];

/// Unit of a relative time period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    /// Months are a fixed 30-day window, not calendar months.
    Months,
}

impl PeriodUnit {
    /// Returns the token suffix for this unit.
    pub const fn suffix(&self) -> &'static str {
        match self {
            PeriodUnit::Seconds => "s",
            PeriodUnit::Minutes => "m",
            PeriodUnit::Hours => "h",
            PeriodUnit::Days => "d",
            PeriodUnit::Weeks => "w",
            PeriodUnit::Months => "M",
        }
    }

    /// Length of one unit in seconds.
    const fn as_secs(&self) -> u64 {
        match self {
            PeriodUnit::Seconds => 1,
            PeriodUnit::Minutes => 60,
            PeriodUnit::Hours => 3_600,
            PeriodUnit::Days => 86_400,
            PeriodUnit::Weeks => 604_800,
            PeriodUnit::Months => 2_592_000,
        }
    }
}

/// Errors that can occur when parsing a period token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    /// The token was empty (or all whitespace).
    #[error("empty period token")]
    Empty,

    /// The token had no recognized unit suffix.
    #[error("missing or unknown unit suffix in {0:?}")]
    UnknownUnit(String),

    /// The amount before the suffix was not a valid number.
    #[error("invalid period amount in {0:?}")]
    InvalidAmount(String),
}

/// A duration expressed relative to "now", e.g. "the last 15 minutes".
///
/// Parses from and renders to the compact token form used by the dashboard:
///
/// ```
/// use rumstate::RelativeTimePeriod;
///
/// let period: RelativeTimePeriod = "15m".parse().unwrap();
/// assert_eq!(period, RelativeTimePeriod::minutes(15));
/// assert_eq!(period.to_string(), "15m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativeTimePeriod {
    amount: u64,
    unit: PeriodUnit,
}

impl RelativeTimePeriod {
    /// Create a period from an amount and unit.
    pub const fn new(amount: u64, unit: PeriodUnit) -> Self {
        Self { amount, unit }
    }

    /// A period of `n` seconds.
    pub const fn seconds(n: u64) -> Self {
        Self::new(n, PeriodUnit::Seconds)
    }

    /// A period of `n` minutes.
    pub const fn minutes(n: u64) -> Self {
        Self::new(n, PeriodUnit::Minutes)
    }

    /// A period of `n` hours.
    pub const fn hours(n: u64) -> Self {
        Self::new(n, PeriodUnit::Hours)
    }

    /// A period of `n` days.
    pub const fn days(n: u64) -> Self {
        Self::new(n, PeriodUnit::Days)
    }

    /// A period of `n` weeks.
    pub const fn weeks(n: u64) -> Self {
        Self::new(n, PeriodUnit::Weeks)
    }

    /// A period of `n` months (30-day windows).
    pub const fn months(n: u64) -> Self {
        Self::new(n, PeriodUnit::Months)
    }

    /// The amount part of the token.
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// The unit part of the token.
    pub const fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// Length of the period as a `Duration`.
    pub const fn to_duration(&self) -> Duration {
        Duration::from_secs(self.amount * self.unit.as_secs())
    }

    /// Length of the period in epoch microseconds, for range arithmetic.
    pub const fn as_micros(&self) -> i64 {
        (self.amount * self.unit.as_secs() * 1_000_000) as i64
    }
}

/// The dashboard's initial window: the last 15 minutes.
impl Default for RelativeTimePeriod {
    fn default() -> Self {
        Self::minutes(15)
    }
}

impl fmt::Display for RelativeTimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for RelativeTimePeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PeriodParseError::Empty);
        }

        for (suffix, unit) in UNITS {
            if let Some(amount_str) = s.strip_suffix(suffix) {
                let amount: u64 = amount_str
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidAmount(s.to_string()))?;
                return Ok(Self::new(amount, *unit));
            }
        }

        Err(PeriodParseError::UnknownUnit(s.to_string()))
    }
}

impl From<RelativeTimePeriod> for String {
    fn from(period: RelativeTimePeriod) -> Self {
        period.to_string()
    }
}

impl TryFrom<String> for RelativeTimePeriod {
    type Error = PeriodParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
