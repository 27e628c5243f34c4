//! Configuration for the rowcast binary.
//!
//! Loads configuration from ${ROWCAST_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rowcast_components::{DatetimeLayout, Precision};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for rowcast configuration and logs.
    //!
    //! ROWCAST_HOME resolution order:
    //! 1. ROWCAST_HOME environment variable (if set)
    //! 2. ~/.config/rowcast (default)
    //! 3. ./.rowcast when no home directory can be determined

    use std::path::PathBuf;

    pub fn rowcast_home() -> PathBuf {
        if let Ok(home) = std::env::var("ROWCAST_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".rowcast"),
            |h| h.join(".config").join("rowcast"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        rowcast_home().join("config.toml")
    }

    /// Directory the log file is written to.
    pub fn log_dir() -> PathBuf {
        rowcast_home()
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Concurrent progress producers in the demo
    pub slots: usize,

    /// Steps each producer takes to reach 100%
    pub steps: u32,

    /// Delay between a producer's frames
    pub interval_ms: u64,

    /// Progress bar width in cells
    pub bar_width: u8,

    /// Emit SGR styling
    pub color: bool,

    /// Elapsed-time precision
    pub timestamp: Precision,

    /// Header clock layout
    pub datetime: DatetimeLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slots: 4,
            steps: 100,
            interval_ms: 40,
            bar_width: 30,
            color: true,
            timestamp: Precision::Milli,
            datetime: DatetimeLayout::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!(
                "{} already exists; edit it, or delete it to start from the template",
                path.display()
            );
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
