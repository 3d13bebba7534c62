//! Minarca client - persisted state of the Minarca backup agent
//!
//! This library holds the state shared by the status window, the background
//! backup process and the command line: user settings, the outcome of the
//! last run and the include/exclude patterns selecting what gets backed up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and the settings, status and patterns stores
//! - `error`: Custom error types
//! - `models`: Value types (timestamps, patterns, run results, schedules)
//! - `storage`: Atomic file replacement and the properties codec
//! - `backup`: `BackupManager`, the surface used by other components
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `minarca` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use minarca::config::{MinarcaPaths, Status};
//!
//! let paths = MinarcaPaths::new()?;
//! let status = Status::open(paths.status_file())?;
//! println!("{}", status.lastresult);
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{MinarcaError, MinarcaResult};
