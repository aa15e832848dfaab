//! Per-tab mode settings
//!
//! Each tab owns one `ModeSettings` document. Persistent tabs keep theirs on
//! disk under `<dir>/mode-settings/<id>.json` so they can be restored after a
//! restart; closing a persistent tab deletes the document.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::SettingsError;
use crate::Result;

const MODE_SETTINGS_DIR: &str = "mode-settings";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeSettings {
    /// Unique identifier, doubles as the on-disk filename
    pub id: String,
    /// Whether this tab survives application restarts
    pub persistent: bool,
    /// Saved tab title, shown when the tab is restored
    pub title: Option<String>,
    /// Name of the mode the tab last ran (opaque to this layer)
    pub mode: Option<String>,

    #[serde(skip)]
    dir: PathBuf,
}

impl ModeSettings {
    /// Fresh defaults with a new unique id.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            persistent: false,
            title: None,
            mode: None,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load an existing document by id.
    pub fn load<P: AsRef<Path>>(dir: P, id: &str) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let path = Self::file_path(&dir, id);

        let raw = std::fs::read_to_string(&path)
            .map_err(|_| SettingsError::NotFound(id.to_string()))?;
        let mut settings: ModeSettings = serde_json::from_str(&raw)?;
        settings.dir = dir;

        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;

        tracing::debug!(id = %self.id, "Saved mode settings");

        Ok(())
    }

    /// Remove the on-disk document. Missing files are fine; the document may
    /// never have been saved.
    pub fn delete(&self) -> Result<()> {
        match std::fs::remove_file(self.path()) {
            Ok(()) => {
                tracing::debug!(id = %self.id, "Deleted mode settings");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> PathBuf {
        Self::file_path(&self.dir, &self.id)
    }

    fn file_path(dir: &Path, id: &str) -> PathBuf {
        dir.join(MODE_SETTINGS_DIR).join(format!("{}.json", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_has_unique_id() {
        let dir = TempDir::new().unwrap();
        let a = ModeSettings::new(dir.path());
        let b = ModeSettings::new(dir.path());

        assert_ne!(a.id, b.id);
        assert!(!a.persistent);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut settings = ModeSettings::new(dir.path());
        settings.persistent = true;
        settings.title = Some("My share".to_string());
        settings.save().unwrap();

        let loaded = ModeSettings::load(dir.path(), &settings.id).unwrap();
        assert!(loaded.persistent);
        assert_eq!(loaded.title.as_deref(), Some("My share"));
        assert_eq!(loaded.path(), settings.path());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = ModeSettings::load(dir.path(), "no-such-id");
        assert!(matches!(result, Err(SettingsError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let dir = TempDir::new().unwrap();

        let settings = ModeSettings::new(dir.path());
        settings.save().unwrap();
        assert!(settings.path().exists());

        settings.delete().unwrap();
        assert!(!settings.path().exists());

        // Deleting again is a no-op
        settings.delete().unwrap();
    }
}
