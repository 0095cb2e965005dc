//! # Client Configuration
//!
//! Settings are read from an optional YAML file; command-line flags and their
//! environment fallbacks override individual values afterwards.
//!
//! ```yaml
//! base_url: "http://192.168.0.12:8000"
//! data_directory: "/home/supervisor/.local/share/asistencia"
//! timezone: "local"        # local | utc | ±HH:MM
//! require_temperature: true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::scanner::ScannerOptions;
use crate::domain::timestamp::TimestampZone;

pub const DEFAULT_BASE_URL: &str = "http://192.168.0.12:8000";
const DATA_DIRECTORY_NAME: &str = "asistencia";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend root, without the `/api` prefix
    pub base_url: String,
    /// Where `session.yaml` lives
    pub data_directory: PathBuf,
    /// Zone attached to scanned timestamps
    pub timezone: TimestampZone,
    pub require_temperature: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_directory: default_data_directory(),
            timezone: TimestampZone::Local,
            require_temperature: true,
        }
    }
}

/// Platform data directory (e.g. `~/.local/share/asistencia`), or `./.asistencia`
pub fn default_data_directory() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIRECTORY_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", DATA_DIRECTORY_NAME)))
}

impl ClientConfig {
    /// Parse a YAML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ClientConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Config from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn scanner_options(&self) -> ScannerOptions {
        ScannerOptions {
            require_temperature: self.require_temperature,
        }
    }
}
