//! # Settings Module
//!
//! Handles user settings persistence.
//!
//! ## Storage
//! Settings are stored as JSON in:
//! `~/.config/wallpaper-changer/settings.json`
//!
//! There is no schema versioning; unknown fields are ignored and missing
//! fields fall back to defaults.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Smallest allowed rotation interval, in minutes.
pub const MIN_INTERVAL_MINUTES: u32 = 1;

/// Largest allowed rotation interval, in minutes.
pub const MAX_INTERVAL_MINUTES: u32 = 10_000;

/// User settings for the application.
///
/// Persisted to `~/.config/wallpaper-changer/settings.json` as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Folder that is scanned (recursively) for wallpaper candidates.
    /// Empty means not configured yet.
    pub folder: String,
    /// Rotation interval in minutes, kept within
    /// [`MIN_INTERVAL_MINUTES`]..=[`MAX_INTERVAL_MINUTES`].
    pub interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder: String::new(),
            interval: MIN_INTERVAL_MINUTES,
        }
    }
}

impl Settings {
    /// Returns the path to the settings file.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wallpaper-changer/settings.json"))
    }

    /// Loads the settings from disk.
    ///
    /// A missing or unparseable file yields defaults, so the application
    /// always starts with a usable configuration. The interval is clamped
    /// into its valid range.
    pub fn load() -> Self {
        Self::path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| serde_json::from_str::<Self>(&content).ok())
            .unwrap_or_default()
            .normalized()
    }

    /// Persists the current settings to disk as pretty-printed JSON,
    /// creating the settings directory if needed.
    pub fn save(&self) -> Result<(), Error> {
        let path = Self::path().ok_or(Error::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// The rotation interval as a [`Duration`].
    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval) * 60)
    }

    fn normalized(mut self) -> Self {
        self.interval = self
            .interval
            .clamp(MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES);
        self
    }
}
