//! Outcome of the last backup run
//!
//! Written by the process running the backup and polled by the status
//! surfaces, persisted in `status.properties`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::MinarcaError;
use crate::models::{Datetime, LastResult};
use crate::storage::{read_properties, write_properties, Properties};

/// Persisted run status bound to one properties file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    #[serde(skip)]
    path: PathBuf,

    /// Diagnostic detail of the last failure
    pub details: Option<String>,

    /// When the last run started or ended
    pub lastdate: Option<Datetime>,

    pub lastresult: LastResult,

    /// When the last successful run ended
    pub lastsuccess: Option<Datetime>,

    /// Process id of the running backup
    pub pid: Option<u32>,

    #[serde(skip)]
    extra: Properties,
}

/// Field names in the order they are written
const FIELDS: [&str; 5] = ["details", "lastdate", "lastresult", "lastsuccess", "pid"];

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Convert a persisted field, logging and dropping values that don't convert
fn coerce<T: std::str::FromStr>(field: &str, value: Option<String>) -> Option<T> {
    let value = non_empty(value)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(field, value = %value, "invalid status value, ignoring");
            None
        }
    }
}

impl Status {
    /// Status with default values, bound to `path` but not loaded
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            details: None,
            lastdate: None,
            lastresult: LastResult::Unknown,
            lastsuccess: None,
            pid: None,
            extra: Properties::new(),
        }
    }

    /// Bind to `path` and load its content
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MinarcaError> {
        let mut status = Self::new(path);
        status.load()?;
        Ok(status)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reset to defaults, then overlay values from disk if the file exists
    ///
    /// Timestamps and pid that cannot be converted are left absent.
    pub fn load(&mut self) -> Result<(), MinarcaError> {
        let path = std::mem::take(&mut self.path);
        *self = Self::new(path);

        let Some(mut props) = read_properties(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "status file missing, using defaults");
            return Ok(());
        };

        self.details = non_empty(props.remove("details"));
        self.lastdate = coerce("lastdate", props.remove("lastdate"));
        self.lastsuccess = coerce("lastsuccess", props.remove("lastsuccess"));
        self.pid = coerce("pid", props.remove("pid"));

        if let Some(value) = non_empty(props.remove("lastresult")) {
            let result: LastResult = value.into();
            if !result.is_known() {
                tracing::warn!(lastresult = %result, "unknown last result");
            }
            self.lastresult = result;
        }

        self.extra = props;
        tracing::debug!(path = %self.path.display(), lastresult = %self.lastresult, "status loaded");
        Ok(())
    }

    /// Write every present, non-empty field to disk
    pub fn save(&self) -> Result<(), MinarcaError> {
        let mut entries: Vec<(&str, String)> = FIELDS
            .iter()
            .filter_map(|&name| non_empty(self.get(name)).map(|value| (name, value)))
            .collect();
        entries.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.clone())));

        write_properties(&self.path, &entries)?;
        tracing::debug!(path = %self.path.display(), lastresult = %self.lastresult, "status saved");
        Ok(())
    }

    /// Get a status field by name in its persisted string form
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            "details" => self.details.clone(),
            "lastdate" => self.lastdate.map(|d| d.epoch_ms().to_string()),
            "lastresult" => Some(self.lastresult.to_string()),
            "lastsuccess" => self.lastsuccess.map(|d| d.epoch_ms().to_string()),
            "pid" => self.pid.map(|p| p.to_string()),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Keys read from disk that are not status fields
    pub fn extra(&self) -> &Properties {
        &self.extra
    }

    /// Record the start of a run by process `pid`
    ///
    /// Refuses when a run is already recorded as running.
    pub fn start(&mut self, pid: u32) -> Result<(), MinarcaError> {
        if self.lastresult == LastResult::Running {
            return Err(MinarcaError::Running { pid: self.pid });
        }
        self.lastresult = LastResult::Running;
        self.lastdate = Some(Datetime::now());
        self.details = None;
        self.pid = Some(pid);
        Ok(())
    }

    /// Record the end of a run, with the failure reason if it failed
    pub fn finish(&mut self, outcome: Result<(), String>) {
        let now = Datetime::now();
        match outcome {
            Ok(()) => {
                self.lastresult = LastResult::Success;
                self.lastsuccess = Some(now);
                self.details = None;
            }
            Err(details) => {
                self.lastresult = LastResult::Failure;
                self.details = Some(details).filter(|d| !d.is_empty());
            }
        }
        self.lastdate = Some(now);
        self.pid = None;
    }

    /// Record that the active run was interrupted
    ///
    /// Returns the pid of the process that should be signaled, if known.
    pub fn stop(&mut self) -> Result<Option<u32>, MinarcaError> {
        if !self.lastresult.is_active() {
            return Err(MinarcaError::NotRunning);
        }
        self.lastresult = LastResult::Interrupt;
        self.lastdate = Some(Datetime::now());
        Ok(self.pid.take())
    }
}
