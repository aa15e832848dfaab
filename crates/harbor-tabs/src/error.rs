//! Tab error types

use thiserror::Error;

use crate::tab::TabId;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(TabId),

    #[error("No tab at index {0}")]
    InvalidIndex(usize),

    #[error("Settings error: {0}")]
    Settings(#[from] harbor_settings::SettingsError),
}
