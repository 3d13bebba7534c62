//! User settings for the Minarca client
//!
//! Identity of the user and repository on the remote server plus the backup
//! interval, persisted in `minarca.properties`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::MinarcaError;
use crate::models::Schedule;
use crate::storage::{read_properties, write_properties, Properties};

/// Persisted settings bound to one properties file
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    #[serde(skip)]
    path: PathBuf,

    /// Account name on the remote server
    pub username: Option<String>,

    /// Name of this computer's repository on the remote server
    pub repositoryname: Option<String>,

    /// Host used to reach the backup server
    pub remotehost: Option<String>,

    /// Base URL of the server web interface
    pub remoteurl: Option<String>,

    /// Interval between scheduled backups
    pub schedule: Schedule,

    /// Whether the agent was linked to a server
    pub configured: bool,

    /// Keys written by other tools, kept so they survive a save
    #[serde(skip)]
    extra: Properties,
}

/// Field names in the order they are written
const FIELDS: [&str; 6] = [
    "username",
    "repositoryname",
    "remotehost",
    "remoteurl",
    "schedule",
    "configured",
];

/// Tokens accepted as `true` for `configured`
fn parse_bool(value: &str) -> bool {
    matches!(value, "true" | "True" | "1")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Settings {
    /// Settings with default values, bound to `path` but not loaded
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            username: None,
            repositoryname: None,
            remotehost: None,
            remoteurl: None,
            schedule: Schedule::default(),
            configured: false,
            extra: Properties::new(),
        }
    }

    /// Bind to `path` and load its content
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, MinarcaError> {
        let mut settings = Self::new(path);
        settings.load()?;
        Ok(settings)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reset to defaults, then overlay values from disk if the file exists
    ///
    /// Values that cannot be converted fall back to their default.
    pub fn load(&mut self) -> Result<(), MinarcaError> {
        let path = std::mem::take(&mut self.path);
        *self = Self::new(path);

        let Some(mut props) = read_properties(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "settings file missing, using defaults");
            return Ok(());
        };

        self.username = non_empty(props.remove("username"));
        self.repositoryname = non_empty(props.remove("repositoryname"));
        self.remotehost = non_empty(props.remove("remotehost"));
        self.remoteurl = non_empty(props.remove("remoteurl"));

        if let Some(value) = props.remove("schedule") {
            match value.trim().parse::<u32>().ok().and_then(Schedule::from_hours) {
                Some(schedule) => self.schedule = schedule,
                None => tracing::warn!(value = %value, "invalid schedule, using default"),
            }
        }

        if let Some(value) = props.remove("configured") {
            self.configured = parse_bool(&value);
        }

        self.extra = props;
        tracing::debug!(path = %self.path.display(), "settings loaded");
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
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Get a setting by name in its persisted string form
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            "username" => self.username.clone(),
            "repositoryname" => self.repositoryname.clone(),
            "remotehost" => self.remotehost.clone(),
            "remoteurl" => self.remoteurl.clone(),
            "schedule" => Some(self.schedule.to_string()),
            "configured" => Some(self.configured.to_string()),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Keys read from disk that are not settings fields
    pub fn extra(&self) -> &Properties {
        &self.extra
    }

    /// Forget the server identity, leaving the agent unlinked
    ///
    /// The schedule and keys written by other tools are kept. Not persisted
    /// until [`Settings::save`] is called.
    pub fn unlink(&mut self) {
        self.username = None;
        self.repositoryname = None;
        self.remotehost = None;
        self.remoteurl = None;
        self.configured = false;
    }

    /// Link to this computer's repository on the server web interface
    ///
    /// Falls back to the bare server URL while the identity is incomplete.
    pub fn remote_url(&self) -> Result<String, MinarcaError> {
        let base = self
            .remoteurl
            .as_deref()
            .ok_or(MinarcaError::NotConfigured("remoteurl"))?;

        match (&self.username, &self.repositoryname) {
            (Some(username), Some(repositoryname)) => Ok(format!(
                "{}/browse/{}/{}",
                base.trim_end_matches('/'),
                username,
                repositoryname
            )),
            _ => Ok(base.to_string()),
        }
    }
}
