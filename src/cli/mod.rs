//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup manager.

pub mod patterns;
pub mod status;

pub use patterns::{handle_patterns_command, handle_select_command, PatternsCommands};
pub use status::{
    handle_schedule_command, handle_settings_command, handle_status_command, handle_unlink_command,
};
