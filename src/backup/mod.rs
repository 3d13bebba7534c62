//! Backup agent state for the Minarca client
//!
//! `BackupManager` is the surface used by the status window, the background
//! backup and the command line. It exposes:
//!
//! - named status and settings fields
//! - the remote repository URL
//! - run bookkeeping (start, finish, stop)
//! - default patterns and patterns grouped by filesystem root
//!
//! # Example
//!
//! ```rust,ignore
//! use minarca::backup::BackupManager;
//! use minarca::config::MinarcaPaths;
//!
//! let manager = BackupManager::new(MinarcaPaths::new()?);
//! manager.start(std::process::id())?;
//! for (root, patterns) in manager.group_patterns_by_root()? {
//!     // run the backup engine once per root
//! }
//! manager.finish(Ok(()))?;
//! ```

mod manager;

pub use manager::BackupManager;
