//! Lock configuration.
//!
//! A [`Config`] describes where a lock lives and how it behaves. It can be
//! loaded from YAML; unknown fields are ignored for forward compatibility.
//!
//! ```yaml
//! path: /tmp/build.lock
//! release_on_exit: true
//! poll_interval_ms: 50
//! ```

use crate::error::{EzlockError, Result};
use crate::lock::{DEFAULT_LOCK_PATH, DEFAULT_POLL_INTERVAL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the lock file (default: ".lock").
    pub path: PathBuf,

    /// Release the lock automatically when the process shuts down.
    pub release_on_exit: bool,

    /// Poll interval used by `wait`, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOCK_PATH),
            release_on_exit: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| EzlockError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| EzlockError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| EzlockError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validation rules:
    /// - `path` must be non-empty
    /// - `poll_interval_ms` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(EzlockError::Config(
                "config validation failed: path must not be empty".to_string(),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(EzlockError::Config(
                "config validation failed: poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
