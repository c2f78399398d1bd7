//! Application settings.
//!
//! Settings are read from a TOML file. Every key is optional; missing keys
//! fall back to their defaults.
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info"
//! max-files = 3
//! directory = "logs"
//!
//! [navigation]
//! tint = "#ff0000"
//! bar-background-color = "default"
//! bar-text-color = "#ffffff"
//! back-button-pops = true
//! ```

use crate::color::Color;
use anyhow::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_PATH: &str = "Settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub logging: LoggingSettings,
    pub navigation: NavigationSettings,
}

impl Settings {
    /// Loads settings from `path`, or returns the defaults if it doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Settings, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Settings::default());
        }

        crate::helpers::load_toml(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        crate::helpers::save_toml(self, path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: String,
    /// Number of run logs to keep, `0` keeps all of them.
    pub max_files: usize,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigationSettings {
    pub tint: Color,
    pub bar_background_color: Color,
    pub bar_text_color: Color,
    /// Navigate back when the current page leaves a back-button press unhandled.
    pub back_button_pops: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        NavigationSettings {
            tint: Color::Default,
            bar_background_color: Color::Default,
            bar_text_color: Color::Default,
            back_button_pops: true,
        }
    }
}
