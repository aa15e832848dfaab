//! Tab container
//!
//! Owns the tab registry and the strip, wires tab notifications to visual
//! updates, and keeps the persisted tab order in settings in sync with the
//! display order. All operations are synchronous; the embedding chrome calls
//! in from its event loop.

use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use harbor_settings::{ModeSettings, SettingsStore};

use crate::bar::{CornerWidget, TabBar, NEW_TAB_BUTTON_SIZE, SCROLL_CONTROLS_OFFSET};
use crate::error::TabError;
use crate::event::{TabEvent, TabNotifier};
use crate::tab::{Tab, TabId};
use crate::Result;

const DEFAULT_TAB_TITLE: &str = "New Tab";

pub struct TabContainer {
    /// Registry of live tabs; the single source of truth for which tabs exist
    tabs: HashMap<TabId, Tab>,
    /// The visual strip
    bar: TabBar,
    /// Monotonic id allocator, never reused
    next_tab_id: u64,
    /// Application settings store
    settings: SettingsStore,
    /// Directory holding per-tab mode settings
    data_dir: PathBuf,
    /// Container width, for "+" button placement
    width: f32,
    /// X position of the "+" button
    new_tab_button_x: f32,
    notifier: TabNotifier,
    events: mpsc::Receiver<TabEvent>,
}

impl TabContainer {
    pub fn new<P: AsRef<Path>>(settings: SettingsStore, data_dir: P, width: f32) -> Self {
        let (notifier, events) = TabNotifier::channel();

        let mut container = Self {
            tabs: HashMap::new(),
            bar: TabBar::new(),
            next_tab_id: 0,
            settings,
            data_dir: data_dir.as_ref().to_path_buf(),
            width,
            new_tab_button_x: 0.0,
            notifier,
            events,
        };
        container.reposition_new_tab_button();
        container
    }

    /// Open a tab. With a settings id, the tab is restored from its saved
    /// mode settings; otherwise it starts from defaults. The new tab becomes
    /// current.
    pub fn add_tab(&mut self, settings_id: Option<&str>) -> Result<TabId> {
        let mode_settings = match settings_id {
            Some(id) => ModeSettings::load(&self.data_dir, id)?,
            None => ModeSettings::new(&self.data_dir),
        };

        let tab_id = TabId(self.next_tab_id);
        self.next_tab_id += 1;

        let mut tab = Tab::new(tab_id, mode_settings, self.notifier.clone());
        let is_persistent = tab.is_persistent();

        let index = self.bar.insert(tab_id, DEFAULT_TAB_TITLE.to_string());
        self.bar.set_current(index);

        tab.init();
        self.tabs.insert(tab_id, tab);

        tracing::info!(tab_id = %tab_id, index, restored = settings_id.is_some(), "Added tab");

        self.pump_events()?;
        self.on_persistence_changed(tab_id, is_persistent)?;
        self.reposition_new_tab_button();

        Ok(tab_id)
    }

    /// Restore a persistent tab from its saved settings.
    pub fn load_tab(&mut self, settings_id: &str) -> Result<TabId> {
        self.add_tab(Some(settings_id))
    }

    /// Open one tab per id saved under `persistent_tabs`, in saved order,
    /// then make sure at least one tab exists. Ids whose settings are gone
    /// from disk are skipped.
    pub fn load_persistent_tabs(&mut self) -> Result<()> {
        for settings_id in self.settings.persistent_tabs() {
            if let Err(e) = self.load_tab(&settings_id) {
                tracing::error!(settings_id = %settings_id, "Skipping persistent tab: {}", e);
            }
        }
        if self.bar.is_empty() {
            self.add_tab(None)?;
        }
        Ok(())
    }

    /// Close the tab at a visual position. The tab may veto; a veto changes
    /// no state. Closing the last tab immediately opens a fresh one, so the
    /// container never ends up empty. The persisted order is recomputed
    /// either way, to stay in sync with any prior reordering.
    ///
    /// Returns whether the tab actually closed.
    pub fn close_tab(&mut self, index: usize) -> Result<bool> {
        let tab_id = self
            .bar
            .tab_id_at(index)
            .ok_or(TabError::InvalidIndex(index))?;

        tracing::debug!(tab_id = %tab_id, index, "Close requested");

        let allowed = match self.tabs.get(&tab_id) {
            Some(tab) => tab.close_tab(),
            None => {
                debug_assert!(false, "tab {} in strip but not in registry", tab_id);
                tracing::error!(tab_id = %tab_id, "Tab in strip but not in registry");
                return Err(TabError::NotFound(tab_id));
            }
        };

        if allowed {
            if let Some(tab) = self.tabs.remove(&tab_id) {
                if tab.is_persistent() {
                    tab.settings().delete()?;
                }
            }
            self.bar.remove(index);

            tracing::info!(tab_id = %tab_id, "Closed tab");

            if self.bar.is_empty() {
                self.add_tab(None)?;
            }
        }

        self.recompute_and_save_persisted_order()?;
        self.reposition_new_tab_button();

        Ok(allowed)
    }

    /// Drain pending tab notifications and apply them.
    pub fn pump_events(&mut self) -> Result<()> {
        loop {
            let event = match self.events.try_recv() {
                Ok(event) => event,
                Err(_) => return Ok(()),
            };
            match event {
                TabEvent::TitleChanged { tab_id, title } => self.on_title_changed(tab_id, title),
                TabEvent::IconChanged { tab_id, icon_path } => {
                    self.on_icon_changed(tab_id, icon_path)
                }
                TabEvent::PersistenceChanged {
                    tab_id,
                    is_persistent,
                } => self.on_persistence_changed(tab_id, is_persistent)?,
            }
        }
    }

    /// Relabel the header of the tab that changed its title.
    pub fn on_title_changed(&mut self, tab_id: TabId, title: String) {
        let Some(index) = self.bar.index_of(tab_id) else {
            debug_assert!(false, "title change for unknown tab {}", tab_id);
            tracing::error!(tab_id = %tab_id, "Title change for unknown tab");
            return;
        };
        self.bar.set_label(index, title);
        // Label width feeds into header layout
        self.reposition_new_tab_button();
    }

    pub fn on_icon_changed(&mut self, tab_id: TabId, icon_path: String) {
        let Some(index) = self.bar.index_of(tab_id) else {
            debug_assert!(false, "icon change for unknown tab {}", tab_id);
            tracing::error!(tab_id = %tab_id, "Icon change for unknown tab");
            return;
        };
        self.bar.set_icon(index, icon_path);
    }

    /// Swap the header's corner widget between the persistent badge and the
    /// hidden placeholder, then re-save the persisted order.
    pub fn on_persistence_changed(&mut self, tab_id: TabId, is_persistent: bool) -> Result<()> {
        let Some(index) = self.bar.index_of(tab_id) else {
            debug_assert!(false, "persistence change for unknown tab {}", tab_id);
            tracing::error!(tab_id = %tab_id, "Persistence change for unknown tab");
            return Ok(());
        };
        let corner = if is_persistent {
            CornerWidget::PersistentBadge
        } else {
            CornerWidget::Hidden
        };
        self.bar.set_corner(index, corner);

        self.recompute_and_save_persisted_order()
    }

    /// Walk the strip in display order, collect the settings id of every
    /// persistent tab, and write the list to the store. Idempotent.
    pub fn recompute_and_save_persisted_order(&mut self) -> Result<()> {
        let order: Vec<String> = self
            .bar
            .iter()
            .filter_map(|tab_id| self.tabs.get(&tab_id))
            .filter(|tab| tab.is_persistent())
            .map(|tab| tab.settings_id().to_string())
            .collect();

        self.settings.set("persistent_tabs", json!(order));
        self.settings.save()?;

        Ok(())
    }

    /// True if any tab's mode has a non-stopped server.
    pub fn has_active_sessions(&self) -> bool {
        self.tabs
            .values()
            .any(|tab| tab.get_mode().is_some_and(|mode| mode.is_active()))
    }

    /// Drag reorder: move the tab at `from` so it lands at `to`.
    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        self.bar.move_tab(from, to);
        self.recompute_and_save_persisted_order()?;
        self.reposition_new_tab_button();
        Ok(())
    }

    pub fn resize(&mut self, width: f32) {
        self.width = width;
        self.reposition_new_tab_button();
    }

    /// Anchor the "+" button after the last header, or at a fixed offset
    /// from the right edge once the headers overflow and the strip would
    /// show scroll controls. The button never extends past the right edge.
    pub fn reposition_new_tab_button(&mut self) {
        let tabs_width = self.bar.total_width();
        self.new_tab_button_x = if tabs_width > self.width {
            self.width - SCROLL_CONTROLS_OFFSET
        } else {
            tabs_width.min(self.width - NEW_TAB_BUTTON_SIZE)
        };
    }

    pub fn new_tab_button_x(&self) -> f32 {
        self.new_tab_button_x
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.bar.current()
    }

    pub fn bar(&self) -> &TabBar {
        &self.bar
    }

    pub fn tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.get(&tab_id)
    }

    pub fn tab_mut(&mut self, tab_id: TabId) -> Option<&mut Tab> {
        self.tabs.get_mut(&tab_id)
    }
}
