//! Supported desktop operating environments
//!
//! Default patterns and root grouping depend on the environment. Functions
//! that care take a `Platform` argument so every environment can be exercised
//! from any host.

use std::fmt;

/// Desktop operating environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The environment this binary was compiled for
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Check if the environment exposes several filesystem roots (drive letters)
    pub const fn has_multiple_roots(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Path separator used when composing native paths
    pub const fn separator(&self) -> char {
        match self {
            Self::Windows => '\\',
            Self::MacOs | Self::Linux => '/',
        }
    }

    /// Join a child name to a native directory path
    pub fn join(&self, dir: &str, child: &str) -> String {
        let sep = self.separator();
        let dir = dir.trim_end_matches(|c: char| c == sep || c == '/');
        format!("{}{}{}", dir, sep, child)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "Windows"),
            Self::MacOs => write!(f, "macOS"),
            Self::Linux => write!(f, "Linux"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(Platform::Linux.join("/home/user", "Documents"), "/home/user/Documents");
        assert_eq!(Platform::Linux.join("/home/user/", "Documents"), "/home/user/Documents");
        assert_eq!(
            Platform::Windows.join("C:\\Users\\user", "Documents"),
            "C:\\Users\\user\\Documents"
        );
    }

    #[test]
    fn test_multiple_roots() {
        assert!(Platform::Windows.has_multiple_roots());
        assert!(!Platform::Linux.has_multiple_roots());
        assert!(!Platform::MacOs.has_multiple_roots());
    }
}
