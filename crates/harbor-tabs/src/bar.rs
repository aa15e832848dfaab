//! The tab strip
//!
//! Display-ordered headers plus the geometry the chrome needs to place the
//! "+" button. The `Vec` position is the visual index; `index_of` resolves a
//! tab id back to its position, so the strip is an explicit bidirectional
//! index between identity and display order.

use crate::tab::TabId;

/// Edge length of the square "+" button.
pub const NEW_TAB_BUTTON_SIZE: f32 = 30.0;

/// Distance from the right edge the "+" button is anchored at when the
/// headers overflow and the strip shows scroll controls.
pub const SCROLL_CONTROLS_OFFSET: f32 = 61.0;

const HEADER_PADDING: f32 = 24.0;
const GLYPH_ADVANCE: f32 = 7.0;
const MIN_HEADER_WIDTH: f32 = 80.0;
const MAX_HEADER_WIDTH: f32 = 200.0;

/// Widget shown in a header's corner. Persistent tabs show a badge; the rest
/// get a zero-size placeholder so the header geometry stays uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerWidget {
    PersistentBadge,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct TabHeader {
    pub tab_id: TabId,
    pub label: String,
    pub icon_path: Option<String>,
    pub corner: CornerWidget,
}

impl TabHeader {
    fn new(tab_id: TabId, label: String) -> Self {
        Self {
            tab_id,
            label,
            icon_path: None,
            corner: CornerWidget::Hidden,
        }
    }

    /// Rendered header width, from a fixed-advance text model.
    pub fn width(&self) -> f32 {
        let text = self.label.chars().count() as f32 * GLYPH_ADVANCE;
        (HEADER_PADDING + text).clamp(MIN_HEADER_WIDTH, MAX_HEADER_WIDTH)
    }
}

pub struct TabBar {
    headers: Vec<TabHeader>,
    current: Option<usize>,
    layout_generation: u64,
}

impl TabBar {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            current: None,
            layout_generation: 0,
        }
    }

    /// Append a header, returning its visual index.
    pub fn insert(&mut self, tab_id: TabId, label: String) -> usize {
        self.headers.push(TabHeader::new(tab_id, label));
        self.layout_generation += 1;
        self.headers.len() - 1
    }

    /// Remove the header at `index`, keeping the current selection on the
    /// same tab where possible.
    pub fn remove(&mut self, index: usize) -> Option<TabHeader> {
        if index >= self.headers.len() {
            return None;
        }
        let header = self.headers.remove(index);
        self.layout_generation += 1;

        self.current = match self.current {
            _ if self.headers.is_empty() => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) => Some(current.min(self.headers.len() - 1)),
            None => None,
        };

        Some(header)
    }

    /// Reorder by drag: move the header at `from` so it lands at `to`. The
    /// selection stays on the same tab, wherever the splice shifts it.
    pub fn move_tab(&mut self, from: usize, to: usize) {
        if from >= self.headers.len() || from == to {
            return;
        }
        let selected = self
            .current
            .and_then(|i| self.headers.get(i))
            .map(|h| h.tab_id);

        let header = self.headers.remove(from);
        let to = to.min(self.headers.len());
        self.headers.insert(to, header);
        self.layout_generation += 1;

        if let Some(tab_id) = selected {
            self.current = self.index_of(tab_id);
        }
    }

    pub fn index_of(&self, tab_id: TabId) -> Option<usize> {
        self.headers.iter().position(|h| h.tab_id == tab_id)
    }

    pub fn tab_id_at(&self, index: usize) -> Option<TabId> {
        self.headers.get(index).map(|h| h.tab_id)
    }

    pub fn set_label(&mut self, index: usize, label: String) {
        if let Some(header) = self.headers.get_mut(index) {
            header.label = label;
            self.layout_generation += 1;
        }
    }

    pub fn set_icon(&mut self, index: usize, icon_path: String) {
        if let Some(header) = self.headers.get_mut(index) {
            header.icon_path = Some(icon_path);
        }
    }

    pub fn set_corner(&mut self, index: usize, corner: CornerWidget) {
        if let Some(header) = self.headers.get_mut(index) {
            header.corner = corner;
        }
    }

    pub fn header(&self, index: usize) -> Option<&TabHeader> {
        self.headers.get(index)
    }

    /// Tab ids in display order.
    pub fn iter(&self) -> impl Iterator<Item = TabId> + '_ {
        self.headers.iter().map(|h| h.tab_id)
    }

    /// Total width of all rendered headers.
    pub fn total_width(&self) -> f32 {
        self.headers.iter().map(|h| h.width()).sum()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn set_current(&mut self, index: usize) {
        if index < self.headers.len() {
            self.current = Some(index);
        }
    }

    /// Bumped on every change that affects header layout.
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }
}

impl Default for TabBar {
    fn default() -> Self {
        Self::new()
    }
}
