//! Path management for the Minarca client
//!
//! Resolves where the settings, status and patterns files live.
//!
//! ## Path Resolution Order
//!
//! 1. `MINARCA_CONFIG_HOME` / `MINARCA_DATA_HOME` environment variables (if set)
//! 2. The platform config and data directories, each with a `minarca` child
//!    (`~/.config/minarca` and `~/.local/share/minarca` on Linux)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::MinarcaError;

/// Manages all paths used by the Minarca client
#[derive(Debug, Clone)]
pub struct MinarcaPaths {
    /// Holds the settings and patterns files
    config_dir: PathBuf,
    /// Holds the status file
    data_dir: PathBuf,
}

impl MinarcaPaths {
    /// Create a new MinarcaPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined and no
    /// override is set.
    pub fn new() -> Result<Self, MinarcaError> {
        let config_override = std::env::var_os("MINARCA_CONFIG_HOME").map(PathBuf::from);
        let data_override = std::env::var_os("MINARCA_DATA_HOME").map(PathBuf::from);

        if let (Some(config_dir), Some(data_dir)) = (&config_override, &data_override) {
            return Ok(Self::with_dirs(config_dir.clone(), data_dir.clone()));
        }

        let base = BaseDirs::new()
            .ok_or_else(|| MinarcaError::Config("Could not determine home directory".into()))?;

        Ok(Self {
            config_dir: config_override.unwrap_or_else(|| base.config_dir().join("minarca")),
            data_dir: data_override.unwrap_or_else(|| base.data_dir().join("minarca")),
        })
    }

    /// Create MinarcaPaths with explicit directories (useful for testing)
    pub fn with_dirs(config_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            config_dir,
            data_dir,
        }
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("minarca.properties")
    }

    /// Get the path to the patterns file
    pub fn patterns_file(&self) -> PathBuf {
        self.config_dir.join("patterns")
    }

    /// Get the path to the status file
    pub fn status_file(&self) -> PathBuf {
        self.data_dir.join("status.properties")
    }

    /// Ensure the config and data directories exist
    pub fn ensure_directories(&self) -> Result<(), MinarcaError> {
        std::fs::create_dir_all(&self.config_dir)
            .map_err(|e| MinarcaError::Io(format!("Failed to create config directory: {}", e)))?;

        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| MinarcaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// The user's home directory, used to build default patterns
pub fn home_dir() -> Result<PathBuf, MinarcaError> {
    BaseDirs::new()
        .map(|base| base.home_dir().to_path_buf())
        .ok_or_else(|| MinarcaError::Config("Could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MinarcaPaths::with_dirs(
            temp_dir.path().join("config"),
            temp_dir.path().join("data"),
        );

        assert_eq!(paths.config_dir(), temp_dir.path().join("config"));
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("MINARCA_CONFIG_HOME", temp_dir.path().join("cfg"));
        env::set_var("MINARCA_DATA_HOME", temp_dir.path().join("dat"));

        let paths = MinarcaPaths::new().unwrap();
        assert_eq!(paths.config_dir(), temp_dir.path().join("cfg"));
        assert_eq!(paths.data_dir(), temp_dir.path().join("dat"));

        env::remove_var("MINARCA_CONFIG_HOME");
        env::remove_var("MINARCA_DATA_HOME");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MinarcaPaths::with_dirs(
            temp_dir.path().join("config"),
            temp_dir.path().join("data"),
        );

        paths.ensure_directories().unwrap();

        assert!(paths.config_dir().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MinarcaPaths::with_dirs(
            temp_dir.path().join("config"),
            temp_dir.path().join("data"),
        );

        assert_eq!(
            paths.settings_file(),
            temp_dir.path().join("config").join("minarca.properties")
        );
        assert_eq!(paths.patterns_file(), temp_dir.path().join("config").join("patterns"));
        assert_eq!(
            paths.status_file(),
            temp_dir.path().join("data").join("status.properties")
        );
    }
}
