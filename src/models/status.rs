//! Outcome of the last backup run

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Result recorded for the last backup run
///
/// Tokens written by other tools that this crate does not know are kept
/// verbatim in [`LastResult::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum LastResult {
    Success,
    Failure,
    /// No backup was ever recorded
    #[default]
    Unknown,
    Running,
    /// Started but never reported back
    Stale,
    Interrupt,
    Other(String),
}

impl LastResult {
    /// The persisted token
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Unknown => "UNKNOWN",
            Self::Running => "RUNNING",
            Self::Stale => "STALE",
            Self::Interrupt => "INTERRUPT",
            Self::Other(token) => token,
        }
    }

    /// Check if a run may still be using system resources
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Stale)
    }

    /// Check if the token is one of the known results
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for LastResult {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "SUCCESS" => Self::Success,
            "FAILURE" => Self::Failure,
            "UNKNOWN" => Self::Unknown,
            "RUNNING" => Self::Running,
            "STALE" => Self::Stale,
            "INTERRUPT" => Self::Interrupt,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for LastResult {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }
}

impl From<LastResult> for String {
    fn from(value: LastResult) -> Self {
        value.as_str().to_string()
    }
}

impl PartialEq<str> for LastResult {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for LastResult {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for LastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
