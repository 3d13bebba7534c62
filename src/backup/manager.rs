//! Entry point for the status window, the background run and the CLI
//!
//! Every call reloads the store it touches so values written by another
//! process are picked up, and writes back immediately when it mutates.

use crate::config::paths::{home_dir, MinarcaPaths};
use crate::config::{Patterns, Settings, Status};
use crate::error::MinarcaResult;
use crate::models::{Pattern, Platform, Schedule};

/// Reads and updates the persisted agent state
#[derive(Debug, Clone)]
pub struct BackupManager {
    paths: MinarcaPaths,
    platform: Platform,
}

impl BackupManager {
    /// Create a manager for the current platform
    pub fn new(paths: MinarcaPaths) -> Self {
        Self::with_platform(paths, Platform::current())
    }

    /// Create a manager applying the rules of `platform`
    pub fn with_platform(paths: MinarcaPaths, platform: Platform) -> Self {
        Self { paths, platform }
    }

    pub fn paths(&self) -> &MinarcaPaths {
        &self.paths
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Current run status
    pub fn status(&self) -> MinarcaResult<Status> {
        Status::open(self.paths.status_file())
    }

    /// A single status field in its persisted form
    pub fn get_status(&self, name: &str) -> MinarcaResult<Option<String>> {
        Ok(self.status()?.get(name))
    }

    /// Current settings
    pub fn settings(&self) -> MinarcaResult<Settings> {
        Settings::open(self.paths.settings_file())
    }

    /// A single setting in its persisted form
    pub fn get_settings(&self, name: &str) -> MinarcaResult<Option<String>> {
        Ok(self.settings()?.get(name))
    }

    /// Link to the repository on the server web interface
    pub fn get_remote_url(&self) -> MinarcaResult<String> {
        self.settings()?.remote_url()
    }

    /// Change the backup interval
    pub fn set_schedule(&self, schedule: Schedule) -> MinarcaResult<()> {
        let mut settings = self.settings()?;
        settings.schedule = schedule;
        settings.save()?;
        tracing::info!(hours = schedule.hours(), "schedule updated");
        Ok(())
    }

    /// Forget the server identity and save the settings
    pub fn unlink(&self) -> MinarcaResult<()> {
        let mut settings = self.settings()?;
        settings.unlink();
        settings.save()?;
        tracing::info!("agent unlinked from server");
        Ok(())
    }

    /// Record that process `pid` started a backup
    pub fn start(&self, pid: u32) -> MinarcaResult<()> {
        let mut status = self.status()?;
        status.start(pid)?;
        status.save()?;
        tracing::info!(pid, "backup started");
        Ok(())
    }

    /// Record the end of the running backup
    pub fn finish(&self, outcome: Result<(), String>) -> MinarcaResult<()> {
        let mut status = self.status()?;
        if let Err(details) = &outcome {
            tracing::info!(details = %details, "backup failed");
        } else {
            tracing::info!("backup completed");
        }
        status.finish(outcome);
        status.save()
    }

    /// Record the interruption of the running backup
    ///
    /// Returns the pid of the backup process, which the caller terminates.
    pub fn stop(&self) -> MinarcaResult<Option<u32>> {
        let mut status = self.status()?;
        let pid = status.stop()?;
        status.save()?;
        tracing::info!(pid = ?pid, "backup interrupted");
        Ok(pid)
    }

    /// Current selection patterns
    pub fn patterns(&self) -> MinarcaResult<Patterns> {
        Patterns::open(self.paths.patterns_file())
    }

    /// Replace the selection patterns with the platform defaults and save them
    pub fn restore_default_patterns(&self) -> MinarcaResult<Patterns> {
        let home = home_dir()?;
        let temp = std::env::temp_dir();

        let mut patterns = Patterns::new(self.paths.patterns_file());
        patterns.restore_defaults_for(self.platform, &home.to_string_lossy(), &temp.to_string_lossy());
        patterns.save()?;
        tracing::info!(count = patterns.len(), "default patterns restored");
        Ok(patterns)
    }

    /// Selection patterns split per filesystem root
    pub fn group_patterns_by_root(&self) -> MinarcaResult<Vec<(String, Vec<Pattern>)>> {
        Ok(self.patterns()?.group_by_roots_for(self.platform))
    }

    /// Add an include rule for `path`
    pub fn include(&self, path: &str) -> MinarcaResult<()> {
        self.add_pattern(Pattern::include(path))
    }

    /// Add an exclude rule for `path`
    pub fn exclude(&self, path: &str) -> MinarcaResult<()> {
        self.add_pattern(Pattern::exclude(path))
    }

    fn add_pattern(&self, pattern: Pattern) -> MinarcaResult<()> {
        let mut patterns = self.patterns()?;
        tracing::debug!(pattern = %pattern, "adding pattern");
        patterns.add(pattern);
        patterns.save()
    }
}
