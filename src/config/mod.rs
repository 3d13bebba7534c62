//! Configuration module for the Minarca client
//!
//! This module provides the persisted state shared by the status window,
//! the background backup and the command line:
//! - Path resolution for the config and data directories
//! - User settings (`minarca.properties`)
//! - Last run status (`status.properties`)
//! - Backup selection patterns (`patterns`)

pub mod paths;
pub mod patterns;
pub mod settings;
pub mod status;

pub use paths::MinarcaPaths;
pub use patterns::Patterns;
pub use settings::Settings;
pub use status::Status;
