//! Millisecond timestamp used by the status file
//!
//! Timestamps are persisted as integer milliseconds since the Unix epoch so
//! the file stays readable by every process sharing it.

use chrono::{Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::ops::Sub;
use std::str::FromStr;

/// Display format, independent of the user locale
const DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// A point in time stored as milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Datetime(i64);

impl Datetime {
    /// Create a timestamp from milliseconds since the Unix epoch
    pub const fn from_epoch_ms(epoch_ms: i64) -> Self {
        Self(epoch_ms)
    }

    /// The current time
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Milliseconds since the Unix epoch
    pub const fn epoch_ms(&self) -> i64 {
        self.0
    }
}

impl Default for Datetime {
    fn default() -> Self {
        Self::now()
    }
}

impl From<i64> for Datetime {
    fn from(epoch_ms: i64) -> Self {
        Self(epoch_ms)
    }
}

impl From<Datetime> for i64 {
    fn from(value: Datetime) -> Self {
        value.0
    }
}

/// Parses the persisted integer form. Surrounding whitespace is ignored.
impl FromStr for Datetime {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// Saturates at the representable duration range instead of overflowing
impl Sub for Datetime {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        let delta = self.0.saturating_sub(rhs.0);
        Duration::try_milliseconds(delta).unwrap_or(if delta < 0 {
            Duration::MIN
        } else {
            Duration::MAX
        })
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Local.timestamp_millis_opt(self.0).single() {
            Some(local) => write!(f, "{}", local.format(DISPLAY_FORMAT)),
            None => write!(f, "{}", self.0),
        }
    }
}
