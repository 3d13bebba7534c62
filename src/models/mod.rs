//! Core value types for the Minarca client
//!
//! These types flow through the settings, status and patterns stores.

pub mod datetime;
pub mod pattern;
pub mod platform;
pub mod schedule;
pub mod status;

pub use datetime::Datetime;
pub use pattern::Pattern;
pub use platform::Platform;
pub use schedule::Schedule;
pub use status::LastResult;
