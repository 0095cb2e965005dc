//! # YAML Key-Value Store
//!
//! File-based persistence for the session entries using a single YAML file
//! `session.yaml` at the root of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! entries:
//!   escuelasupervisor: "CAI Norte"
//!   token: "eyJhbGciOi..."
//! data_format_version: "1.0"
//! updated_at: "2025-04-09T19:35:00Z"
//! ```
//!
//! Writes go to a temp file first and are renamed into place.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

use super::traits::KeyValueStorage;

const SESSION_FILE_NAME: &str = "session.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
    data_format_version: String,
    updated_at: String,
}

impl Default for SessionFile {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            data_format_version: "1.0".to_string(),
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Key-value store persisted as YAML in the data directory
pub struct YamlKeyValueStore {
    base_directory: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlKeyValueStore {
    /// Create a store rooted at `base_directory`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {:?}", base_path))?;
            info!("Created data directory: {:?}", base_path);
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn file_path(&self) -> PathBuf {
        self.base_directory.join(SESSION_FILE_NAME)
    }

    fn load(&self) -> Result<SessionFile> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(SessionFile::default());
        }

        let yaml_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let file: SessionFile = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        debug!("Loaded {} session entries from {:?}", file.entries.len(), path);
        Ok(file)
    }

    fn save(&self, file: &mut SessionFile) -> Result<()> {
        let path = self.file_path();
        file.updated_at = Utc::now().to_rfc3339();

        let yaml_content = serde_yaml::to_string(file)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved session entries to {:?}", path);
        Ok(())
    }

    fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;
        let mut file = self.load()?;
        mutate(&mut file.entries);
        self.save(&mut file)
    }
}

impl KeyValueStorage for YamlKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })?;
        info!("Stored '{}'", key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })?;
        info!("Removed '{}'", key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.update(|entries| entries.clear())?;
        info!("Cleared all stored entries");
        Ok(())
    }
}
