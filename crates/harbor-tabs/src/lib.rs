//! Harbor Tab Strip
//!
//! Owns the set of open tabs, their display order, and the persisted-order
//! list written to settings. Headless: the visual strip is modeled with
//! explicit geometry so the embedding chrome can place widgets, and so the
//! layout contract is testable without a toolkit.

mod bar;
mod container;
mod error;
mod event;
mod mode;
mod tab;

pub use bar::{CornerWidget, TabBar, TabHeader, NEW_TAB_BUTTON_SIZE, SCROLL_CONTROLS_OFFSET};
pub use container::TabContainer;
pub use error::TabError;
pub use event::{TabEvent, TabNotifier};
pub use mode::{Mode, ServerStatus};
pub use tab::{Tab, TabId};

// Re-export the settings layer for embedders
pub use harbor_settings::{ModeSettings, SettingsError, SettingsStore};

pub type Result<T> = std::result::Result<T, TabError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
