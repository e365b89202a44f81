//! Persisted settings
//!
//! A single JSON file holding the analyzer API key. Loaded once at startup,
//! written on every change; nothing else in the player persists across runs
//! (library, queue and favorites are rebuilt from the live scan).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    api_key: Option<String>,
}

/// Settings store backed by a JSON file at an explicit path
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: SettingsFile,
}

impl SettingsStore {
    /// Load settings from disk
    ///
    /// A missing file yields empty settings; a malformed file is an error so
    /// a bad write never silently wipes the key.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            SettingsFile::default()
        };
        Ok(Self { path, settings })
    }

    /// The settings file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored analyzer API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.settings.api_key.as_deref()
    }

    /// Store a new API key and write it through to disk
    pub fn set_api_key(&mut self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        self.settings.api_key = if key.is_empty() { None } else { Some(key) };
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.settings)?)?;
        Ok(())
    }
}
