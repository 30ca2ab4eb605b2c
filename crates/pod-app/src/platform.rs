//! Per-user directories for the viewer's config and logs.

use std::path::PathBuf;

use pod_config::{Config, ConfigError};

/// Errors that can occur while resolving platform directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("could not resolve the config directory: {0}")]
    Config(#[from] ConfigError),
}

/// OS-specific directory paths for the viewer.
///
/// Follows OS conventions via `dirs` (XDG on Linux, Known Folders on
/// Windows, Library on macOS).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON log written by debug builds.
    pub log_dir: PathBuf,
}

pub const APP_NAME: &str = "space-observation-pod";

impl PlatformDirs {
    /// Resolve directories without creating them. The log directory is
    /// created by the logger when it first writes.
    pub fn resolve() -> Result<Self, PlatformError> {
        Ok(Self::from_config_dir(Config::default_dir()?))
    }

    /// Directories for an explicit config location, e.g. from `--config`.
    pub fn from_config_dir(config_dir: PathBuf) -> Self {
        let log_dir = config_dir.join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_absolute_when_available() {
        // Headless CI may have no config dir; that is an error, not a panic.
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.is_absolute());
            assert!(dirs.config_dir.ends_with(APP_NAME));
            assert!(dirs.log_dir.starts_with(&dirs.config_dir));
        }
    }

    #[test]
    fn test_log_dir_nested_under_config_dir() {
        let dirs = PlatformDirs::from_config_dir(PathBuf::from("pod-config"));
        assert_eq!(dirs.log_dir, PathBuf::from("pod-config").join("logs"));
    }

    #[test]
    fn test_no_hardcoded_separators() {
        let dirs = PlatformDirs::from_config_dir(PathBuf::from("root").join(APP_NAME));
        let expected: PathBuf = ["root", APP_NAME, "logs"].iter().collect();
        assert_eq!(dirs.log_dir, expected);
    }
}
