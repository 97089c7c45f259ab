//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The global shortcut binding for spawning countdown windows
//! - The fixed-clock time zone
//! - Per-kind default window sizes
//! - Notification and chime enablement
//!
//! Configuration is stored at `~/.config/tickdown/config.toml`. A missing
//! file yields defaults; a malformed file is an error the caller may choose
//! to log and replace with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Keyboard shortcuts configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortcutsConfig {
    /// Process-wide hotkey that spawns a new countdown window.
    #[serde(default = "default_new_countdown")]
    pub new_countdown: String,
}

/// Fixed-clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// IANA zone id shown by fixed-clock windows. Not editable from the
    /// window itself.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Play the audible chime alongside the system notification.
    #[serde(default = "default_true")]
    pub chime: bool,
}

/// Default logical sizes for newly created windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_countdown_width")]
    pub countdown_width: f64,
    #[serde(default = "default_countdown_height")]
    pub countdown_height: f64,
    #[serde(default = "default_clock_width")]
    pub clock_width: f64,
    #[serde(default = "default_clock_height")]
    pub clock_height: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tickdown/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shortcuts: ShortcutsConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

// Default functions
fn default_new_countdown() -> String {
    "CommandOrControl+N".into()
}
fn default_time_zone() -> String {
    "America/Los_Angeles".into()
}
fn default_true() -> bool {
    true
}
fn default_countdown_width() -> f64 {
    300.0
}
fn default_countdown_height() -> f64 {
    200.0
}
fn default_clock_width() -> f64 {
    340.0
}
fn default_clock_height() -> f64 {
    180.0
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        Self {
            new_countdown: default_new_countdown(),
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            chime: true,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            countdown_width: default_countdown_width(),
            countdown_height: default_countdown_height(),
            clock_width: default_clock_width(),
            clock_height: default_clock_height(),
        }
    }
}

/// Returns `~/.config/tickdown[-dev]/` based on TICKDOWN_ENV.
///
/// Set TICKDOWN_ENV=dev to use a development data directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .ok_or_else(|| ConfigError::DirUnavailable("home directory not found".into()))?
        .join(".config");

    let env = std::env::var("TICKDOWN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("tickdown-dev")
    } else {
        base_dir.join("tickdown")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {}", dir.display(), e)))?;
    Ok(dir)
}

impl Config {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&data_dir()?.join("config.toml"))
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.shortcuts.new_countdown, "CommandOrControl+N");
        assert_eq!(config.clock.time_zone, "America/Los_Angeles");
        assert!(config.notifications.enabled);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.clock.time_zone = "Asia/Tokyo".into();
        config.notifications.chime = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.clock.time_zone, "Asia/Tokyo");
        assert!(!loaded.notifications.chime);
        assert_eq!(loaded.window.countdown_width, 300.0);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[clock]\ntime_zone = \"Europe/Berlin\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.clock.time_zone, "Europe/Berlin");
        assert_eq!(config.shortcuts.new_countdown, "CommandOrControl+N");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not toml at {{ all").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
