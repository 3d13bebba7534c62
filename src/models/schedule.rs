//! Backup interval in hours

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::MinarcaError;

/// Interval between scheduled backups, in hours. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Schedule(NonZeroU32);

impl Schedule {
    pub const HOURLY: Schedule = Schedule::from_const(1);
    pub const DAILY: Schedule = Schedule::from_const(24);
    pub const WEEKLY: Schedule = Schedule::from_const(168);
    pub const MONTHLY: Schedule = Schedule::from_const(720);

    const fn from_const(hours: u32) -> Self {
        match NonZeroU32::new(hours) {
            Some(hours) => Self(hours),
            None => panic!("schedule must be positive"),
        }
    }

    /// Create a schedule from a number of hours, `None` for zero
    pub fn from_hours(hours: u32) -> Option<Self> {
        NonZeroU32::new(hours).map(Self)
    }

    /// Interval in hours
    pub fn hours(&self) -> u32 {
        self.0.get()
    }

    /// Name of the interval when it matches one of the presets
    pub fn name(&self) -> Option<&'static str> {
        match self.hours() {
            1 => Some("hourly"),
            24 => Some("daily"),
            168 => Some("weekly"),
            720 => Some("monthly"),
            _ => None,
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::DAILY
    }
}

/// Accepts a positive hour count or one of the preset names
impl FromStr for Schedule {
    type Err = MinarcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "hourly" => return Ok(Self::HOURLY),
            "daily" => return Ok(Self::DAILY),
            "weekly" => return Ok(Self::WEEKLY),
            "monthly" => return Ok(Self::MONTHLY),
            _ => {}
        }
        s.parse::<u32>()
            .ok()
            .and_then(Self::from_hours)
            .ok_or_else(|| MinarcaError::Config(format!("Invalid schedule: {}", s)))
    }
}

impl TryFrom<u32> for Schedule {
    type Error = MinarcaError;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        Self::from_hours(hours)
            .ok_or_else(|| MinarcaError::Config("Schedule must be a positive number of hours".into()))
    }
}

impl From<Schedule> for u32 {
    fn from(value: Schedule) -> Self {
        value.hours()
    }
}

/// Persisted form: the hour count
impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hours())
    }
}
