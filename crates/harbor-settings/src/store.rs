//! Application settings store
//!
//! A key-value map backed by a single `settings.json` file. Writes are
//! synchronous: `save` serializes the whole map and flushes it to disk.

use parking_lot::RwLock;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Result;

const SETTINGS_FILENAME: &str = "settings.json";

struct Inner {
    path: PathBuf,
    values: Map<String, Value>,
}

pub struct SettingsStore {
    inner: Arc<RwLock<Inner>>,
}

impl SettingsStore {
    /// Load settings from `dir/settings.json`, filling in defaults for any
    /// missing keys. A missing or unreadable file yields pure defaults.
    pub fn load<P: AsRef<Path>>(dir: P) -> Self {
        let path = dir.as_ref().join(SETTINGS_FILENAME);

        let mut values = Self::defaults();
        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
                Ok(loaded) => {
                    for (key, value) in loaded {
                        values.insert(key, value);
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Corrupt settings file, using defaults: {}", e);
                }
            },
            Err(_) => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
            }
        }

        Self {
            inner: Arc::new(RwLock::new(Inner { path, values })),
        }
    }

    fn defaults() -> Map<String, Value> {
        let mut values = Map::new();
        values.insert("locale".to_string(), json!("en"));
        values.insert("persistent_tabs".to_string(), json!([]));
        values
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().values.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: Value) {
        self.inner.write().values.insert(key.to_string(), value);
    }

    /// Write the settings map to disk, creating the parent directory if
    /// needed.
    pub fn save(&self) -> Result<()> {
        let inner = self.inner.read();
        if let Some(parent) = inner.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&inner.values)?;
        std::fs::write(&inner.path, raw)?;

        tracing::debug!(path = %inner.path.display(), "Saved settings");

        Ok(())
    }

    /// The saved display order of persistent tabs, by mode-settings id.
    pub fn persistent_tabs(&self) -> Vec<String> {
        self.get("persistent_tabs")
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
