//! Configuration for the `ybus` command.
//!
//! Stored in `~/.ybus/config.toml` unless `--config` points elsewhere. Partial
//! files are fine: every unspecified value keeps its default.
//!
//! ```toml
//! [core]
//! policy = "location-selectable"
//!
//! [output]
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ybus_core::{StampingPolicy, YBusError, YBusResult};

use crate::cli::OutputFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YbusConfig {
    pub core: CoreConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Policy used when neither the command line nor the case file picks one.
    pub policy: StampingPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Indent JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            pretty_json: true,
        }
    }
}

impl YbusConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ybus"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load from the default location, or defaults if there is no file.
    pub fn load() -> YBusResult<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> YBusResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            YBusError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }

    /// An explicit path must exist; the default location is optional.
    pub fn resolve(explicit: Option<&Path>) -> YBusResult<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn to_toml(&self) -> YBusResult<String> {
        toml::to_string_pretty(self).map_err(|e| YBusError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> YBusResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}
