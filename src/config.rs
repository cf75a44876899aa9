//! Shell configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fs::DEFAULT_HOME;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config from {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Name shown in the prompt and by `whoami`.
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Home directory inside the virtual file system.
    #[serde(default = "default_home")]
    pub home: String,

    /// Where the file system snapshot is persisted. No persistence when unset.
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    /// Refresh interval of `top` in milliseconds.
    #[serde(default = "default_top_interval")]
    pub top_interval_ms: u64,

    /// Run the boot checks before the first prompt.
    #[serde(default = "default_boot_checks")]
    pub boot_checks: bool,
}

fn default_user() -> String {
    "user".to_string()
}

fn default_hostname() -> String {
    "central-terminal".to_string()
}

fn default_home() -> String {
    DEFAULT_HOME.to_string()
}

fn default_top_interval() -> u64 {
    1000
}

fn default_boot_checks() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            hostname: default_hostname(),
            home: default_home(),
            state_file: None,
            top_interval_ms: default_top_interval(),
            boot_checks: default_boot_checks(),
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml { path: origin.to_path_buf(), source })
    }

    /// Load configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml(&content, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ShellConfig::from_toml("", Path::new("x.toml")).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.home, "/home/user");
        assert_eq!(config.top_interval_ms, 1000);
        assert!(config.boot_checks);
    }

    #[test]
    fn test_partial_override() {
        let config = ShellConfig::from_toml(
            "user = \"ada\"\nhostname = \"engine\"\nstate_file = \"/tmp/vfs.json\"\nboot_checks = false\n",
            Path::new("x.toml"),
        )
        .unwrap();
        assert_eq!(config.user, "ada");
        assert_eq!(config.hostname, "engine");
        assert_eq!(config.state_file, Some(PathBuf::from("/tmp/vfs.json")));
        assert!(!config.boot_checks);
        assert_eq!(config.home, "/home/user");
    }

    #[test]
    fn test_bad_toml() {
        let err = ShellConfig::from_toml("user = ", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_missing_file() {
        let err = ShellConfig::load_from(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
