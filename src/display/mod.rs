//! Display formatting for terminal output
//!
//! Provides utilities for formatting the run status and selection patterns
//! for terminal display.

pub mod patterns;
pub mod status;

pub use patterns::{format_pattern_list, format_root_groups};
pub use status::{format_status, header_text, health, last_backup_text, start_stop_text, Health};
