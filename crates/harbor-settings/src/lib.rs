//! Harbor Settings Layer
//!
//! JSON-file persistence for application settings and per-tab mode settings.

mod error;
mod mode;
mod store;

pub use error::SettingsError;
pub use mode::ModeSettings;
pub use store::SettingsStore;

pub type Result<T> = std::result::Result<T, SettingsError>;
