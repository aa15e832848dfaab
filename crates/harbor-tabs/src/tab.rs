//! A single tab
//!
//! Owns its mode settings and, once a mode has been started, the mode's
//! server state. Pushes title, icon, and persistence changes to the container
//! through its notifier.

use harbor_settings::ModeSettings;

use crate::event::{TabEvent, TabNotifier};
use crate::mode::{Mode, ServerStatus};
use crate::Result;

/// Process-local tab identifier. Allocated monotonically by the container,
/// never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct Tab {
    /// Unique identifier within the container
    pub tab_id: TabId,
    settings: ModeSettings,
    mode: Option<Mode>,
    title: String,
    notifier: TabNotifier,
}

impl Tab {
    pub fn new(tab_id: TabId, settings: ModeSettings, notifier: TabNotifier) -> Self {
        Self {
            tab_id,
            settings,
            mode: None,
            title: String::new(),
            notifier,
        }
    }

    /// Apply loaded settings. Restored persistent tabs announce their saved
    /// title so the strip can relabel the default header.
    pub fn init(&mut self) {
        tracing::debug!(tab_id = %self.tab_id, settings_id = %self.settings.id, "Tab init");

        if let Some(title) = self.settings.title.clone() {
            self.set_title(title);
        }
    }

    /// Whether closing is permitted. Vetoed while the tab's server is
    /// starting, serving, or shutting down.
    pub fn close_tab(&self) -> bool {
        match &self.mode {
            Some(mode) if mode.is_active() => {
                tracing::warn!(
                    tab_id = %self.tab_id,
                    status = %mode.server_status,
                    "Refusing to close tab with active server"
                );
                false
            }
            _ => true,
        }
    }

    pub fn get_mode(&self) -> Option<&Mode> {
        self.mode.as_ref()
    }

    /// Start a mode in this tab. The server begins stopped.
    pub fn start_mode(&mut self, name: String) {
        self.settings.mode = Some(name.clone());
        self.mode = Some(Mode::new(name));
    }

    pub fn set_server_status(&mut self, status: ServerStatus) {
        if let Some(mode) = &mut self.mode {
            tracing::debug!(tab_id = %self.tab_id, status = %status, "Server status changed");
            mode.server_status = status;
        }
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title.clone();
        self.settings.title = Some(title.clone());
        self.notifier.send(TabEvent::TitleChanged {
            tab_id: self.tab_id,
            title,
        });
    }

    pub fn set_icon(&mut self, icon_path: String) {
        self.notifier.send(TabEvent::IconChanged {
            tab_id: self.tab_id,
            icon_path,
        });
    }

    /// Toggle persistence. Enabling writes the mode settings to disk so the
    /// tab can be restored after a restart; disabling removes the document
    /// again so it cannot linger once the tab is gone.
    pub fn set_persistent(&mut self, enabled: bool) -> Result<()> {
        self.settings.persistent = enabled;
        if enabled {
            self.settings.save()?;
        } else {
            self.settings.delete()?;
        }
        self.notifier.send(TabEvent::PersistenceChanged {
            tab_id: self.tab_id,
            is_persistent: enabled,
        });
        Ok(())
    }

    pub fn is_persistent(&self) -> bool {
        self.settings.persistent
    }

    /// The settings identifier recorded in the persisted tab order.
    pub fn settings_id(&self) -> &str {
        &self.settings.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn settings(&self) -> &ModeSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tab(dir: &std::path::Path) -> (Tab, std::sync::mpsc::Receiver<TabEvent>) {
        let (notifier, rx) = TabNotifier::channel();
        let tab = Tab::new(TabId(7), ModeSettings::new(dir), notifier);
        (tab, rx)
    }

    #[test]
    fn test_close_allowed_without_mode() {
        let dir = TempDir::new().unwrap();
        let (tab, _rx) = tab(dir.path());
        assert!(tab.close_tab());
    }

    #[test]
    fn test_close_vetoed_while_server_active() {
        let dir = TempDir::new().unwrap();
        let (mut tab, _rx) = tab(dir.path());

        tab.start_mode("share".to_string());
        assert!(tab.close_tab());

        tab.set_server_status(ServerStatus::Started);
        assert!(!tab.close_tab());

        tab.set_server_status(ServerStatus::Stopped);
        assert!(tab.close_tab());
    }

    #[test]
    fn test_set_title_notifies() {
        let dir = TempDir::new().unwrap();
        let (mut tab, rx) = tab(dir.path());

        tab.set_title("Files".to_string());

        assert_eq!(tab.title(), "Files");
        assert_eq!(
            rx.try_recv().unwrap(),
            TabEvent::TitleChanged {
                tab_id: TabId(7),
                title: "Files".to_string()
            }
        );
    }

    #[test]
    fn test_set_persistent_saves_settings() {
        let dir = TempDir::new().unwrap();
        let (mut tab, rx) = tab(dir.path());

        tab.set_persistent(true).unwrap();

        assert!(tab.settings().path().exists());
        assert_eq!(
            rx.try_recv().unwrap(),
            TabEvent::PersistenceChanged {
                tab_id: TabId(7),
                is_persistent: true
            }
        );
    }

    #[test]
    fn test_set_persistent_off_removes_document() {
        let dir = TempDir::new().unwrap();
        let (mut tab, rx) = tab(dir.path());

        tab.set_persistent(true).unwrap();
        assert!(tab.settings().path().exists());

        tab.set_persistent(false).unwrap();
        assert!(!tab.settings().path().exists());

        // Toggling off a tab that was never persistent is fine too
        tab.set_persistent(false).unwrap();

        let events: Vec<TabEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_init_announces_saved_title() {
        let dir = TempDir::new().unwrap();
        let (notifier, rx) = TabNotifier::channel();

        let mut settings = ModeSettings::new(dir.path());
        settings.title = Some("Restored".to_string());

        let mut tab = Tab::new(TabId(1), settings, notifier);
        tab.init();

        assert_eq!(
            rx.try_recv().unwrap(),
            TabEvent::TitleChanged {
                tab_id: TabId(1),
                title: "Restored".to_string()
            }
        );
    }
}
