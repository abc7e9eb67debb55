rust_i18n::i18n!("locales", fallback = "en");

pub mod capture;
pub mod color;
pub mod config;
pub mod gui;
pub mod i18n;
pub mod key_monitor;
pub mod logging;
pub mod overlay;
pub mod settings;
pub mod speed;

/// Settings file read once at startup from the working directory.
pub const SETTINGS_FILE: &str = "settings.json";
